use std::cmp::Ordering;

use strandview_types::{FieldValue, SortDirection, Strand};

use crate::collate::collate;
use crate::extract::extract;

/// Produce a new, stably sorted strand list ordered by one field.
///
/// Keys are extracted once per record, so cost is O(n) extractions plus the
/// sort's comparisons. The input is never mutated.
pub fn sort(strands: &[Strand], field: &str, direction: SortDirection) -> Vec<Strand> {
    let mut keyed: Vec<(FieldValue, Strand)> = strands
        .iter()
        .map(|strand| (extract(strand, field), strand.clone()))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_values(a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, strand)| strand).collect()
}

/// Ascending comparison between two extracted values.
///
/// Missing ranks after every present value, so missing sorts last
/// ascending and (after the caller reverses) first descending. Numeric
/// kinds compare numerically, including Ordinal against Number; any other
/// pairing falls back to collation over the textual forms.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
        (FieldValue::Missing, _) => Ordering::Greater,
        (_, FieldValue::Missing) => Ordering::Less,
        _ => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => collate(&a.text_form(), &b.text_form()),
        },
    }
}
