//! # Text Normalization
//!
//! Folding rules shared by city resolution and department mapping.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strips diacritics, lower-cases, trims and collapses inner whitespace.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::services::text::normalize;
///
/// assert_eq!(normalize("  Bogotá   D.C. "), "bogota d.c.");
/// assert_eq!(normalize("MEDELLÍN"), "medellin");
/// ```
#[must_use]
pub fn normalize(input: &str) -> String {
    let folded: String = strip_diacritics(input).to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes combining marks after canonical decomposition (`ñ` becomes `n`).
#[must_use]
pub fn strip_diacritics(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// True if either normalized string contains the other.
///
/// Empty strings never match.
#[must_use]
pub fn loosely_contains(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Title-cases a raw token: `ground_plus` becomes `Ground Plus`.
#[must_use]
pub fn title_case(token: &str) -> String {
    token
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize("Cúcuta"), "cucuta");
        assert_eq!(normalize("San José del Guaviare"), "san jose del guaviare");
        assert_eq!(normalize("Nariño"), "narino");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  Santa   Marta\t"), "santa marta");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn loosely_contains_both_directions() {
        assert!(loosely_contains("bogota d.c.", "bogota"));
        assert!(loosely_contains("bogota", "bogota d.c."));
        assert!(!loosely_contains("antioquia", "bogota"));
        assert!(!loosely_contains("", "bogota"));
    }

    #[test]
    fn title_case_tokens() {
        assert_eq!(title_case("ground_plus"), "Ground Plus");
        assert_eq!(title_case("ECONOMY-cargo"), "Economy Cargo");
        assert_eq!(title_case(""), "");
    }
}
