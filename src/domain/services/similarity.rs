//! # String Similarity
//!
//! Levenshtein distance (Wagner-Fischer, two rows) and the normalized
//! similarity score used by fuzzy city matching.

/// Edit distance between two strings, counted in Unicode scalar values.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::services::similarity::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("", "abc"), 3);
/// ```
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut curr = Vec::with_capacity(prev.len());
        curr.push(i + 1);
        for ((cb, diagonal), up) in b.iter().zip(prev.iter()).zip(prev.iter().skip(1)) {
            let left = curr.last().copied().unwrap_or(i + 1);
            let substitution = diagonal + usize::from(ca != cb);
            curr.push((left + 1).min(up + 1).min(substitution));
        }
        prev = curr;
    }

    prev.last().copied().unwrap_or(0)
}

/// `1 - distance / max(len)`, in `[0, 1]`. Two empty strings score 1.0.
///
/// Callers are expected to normalize both sides first.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::services::similarity::similarity;
///
/// assert!((similarity("medelin", "medellin") - 0.875).abs() < 1e-9);
/// ```
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    1.0 - (distance as f64 / longest as f64)
}
