/// Deterministic HSL color for an arbitrary group key.
///
/// Rolling 32-bit hash over the key's UTF-16 code units,
/// `hash = unit + ((hash << 5) - hash)`, with wrapping arithmetic. The hue
/// is the Euclidean remainder mod 360; saturation and lightness are fixed.
/// Stable across calls and processes; collisions are tolerated.
pub fn color_for(key: &str) -> String {
    let mut hash: i32 = 0;
    for unit in key.encode_utf16() {
        hash = (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    let hue = hash.rem_euclid(360);
    format!("hsl({}, 60%, 50%)", hue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_same_color() {
        assert_eq!(color_for("backend"), color_for("backend"));
    }

    #[test]
    fn known_key_hashes_to_expected_hue() {
        // hash("rust") = ((114*31 + 117)*31 + 115)*31 + 116 = 3512292; 3512292 % 360 = 132
        assert_eq!(color_for("rust"), "hsl(132, 60%, 50%)");
    }

    #[test]
    fn empty_key_is_still_a_valid_color() {
        assert_eq!(color_for(""), "hsl(0, 60%, 50%)");
    }

    #[test]
    fn non_ascii_keys_hash_over_utf16_units() {
        // One code point outside the BMP becomes a surrogate pair, two units.
        let a = color_for("📚");
        let b = color_for("📚");
        assert_eq!(a, b);
        assert!(a.starts_with("hsl("));
    }
}
