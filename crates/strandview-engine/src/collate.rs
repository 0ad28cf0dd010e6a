use std::cmp::Ordering;

/// Single string comparator used for every textual ordering in the engine
/// (sort keys, discovered group values).
///
/// Compares Unicode-lowercased code points so mixed-case and non-ASCII
/// titles order sensibly, then breaks exact-fold ties on the raw strings so
/// the order stays total. Plain byte ordering is not acceptable here.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}
