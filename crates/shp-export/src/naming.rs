//! Output base-name normalization.

use unicode_normalization::UnicodeNormalization;

/// Turn an object display name into a safe file base name.
///
/// NFKD-decompose, keep only ASCII, lowercase, spaces to underscores,
/// drop anything outside `[a-z0-9_]`.
pub fn normalize_object_name(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    ascii
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_underscores() {
        assert_eq!(normalize_object_name("Plaza X"), "plaza_x");
    }

    #[test]
    fn test_accents_are_stripped() {
        assert_eq!(normalize_object_name("Estación Río Ñandú"), "estacion_rio_nandu");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(
            normalize_object_name("Red vial (pavimentada) – 2024"),
            "red_vial_pavimentada__2024"
        );
    }
}
