//! # City Match Result
//!
//! Diagnostics produced by every city resolution. The report is always
//! returned to the caller alongside the quotes, including when the city
//! could not be matched.

use crate::domain::entities::AdminDivisionEntry;
use crate::domain::value_objects::MatchType;
use serde::{Deserialize, Serialize};

/// A candidate municipality offered when the match was not exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    /// Municipality name.
    pub municipality: String,
    /// Department name.
    pub department: String,
    /// Similarity in `[0, 1]`.
    pub similarity: f64,
}

impl MatchSuggestion {
    /// Builds a suggestion from a reference entry and its score.
    #[must_use]
    pub fn from_entry(entry: &AdminDivisionEntry, similarity: f64) -> Self {
        Self {
            municipality: entry.municipality_name().to_string(),
            department: entry.department_name().to_string(),
            similarity,
        }
    }
}

/// Outcome of resolving a free-text city against the reference table.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::entities::{AdminDivisionEntry, CityMatchResult};
/// use shipping_quote::domain::value_objects::MatchType;
///
/// let entry = AdminDivisionEntry::new("05001", "Medellín", "Antioquia");
/// let result = CityMatchResult::exact("medellin", &entry);
/// assert_eq!(result.match_type(), MatchType::Exact);
/// assert!((result.confidence() - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityMatchResult {
    match_type: MatchType,
    input_city: String,
    matched_municipality: Option<String>,
    matched_department: Option<String>,
    confidence: f64,
    suggestions: Vec<MatchSuggestion>,
}

impl CityMatchResult {
    /// An exact match, confidence 1.0.
    #[must_use]
    pub fn exact(input_city: impl Into<String>, entry: &AdminDivisionEntry) -> Self {
        Self {
            match_type: MatchType::Exact,
            input_city: input_city.into(),
            matched_municipality: Some(entry.municipality_name().to_string()),
            matched_department: Some(entry.department_name().to_string()),
            confidence: 1.0,
            suggestions: Vec::new(),
        }
    }

    /// A similarity match; confidence is the similarity of `entry`.
    #[must_use]
    pub fn fuzzy(
        input_city: impl Into<String>,
        entry: &AdminDivisionEntry,
        similarity: f64,
        suggestions: Vec<MatchSuggestion>,
    ) -> Self {
        Self {
            match_type: MatchType::Fuzzy,
            input_city: input_city.into(),
            matched_municipality: Some(entry.municipality_name().to_string()),
            matched_department: Some(entry.department_name().to_string()),
            confidence: similarity.clamp(0.0, 1.0),
            suggestions,
        }
    }

    /// No entry cleared the similarity threshold.
    #[must_use]
    pub fn not_found(input_city: impl Into<String>) -> Self {
        Self {
            match_type: MatchType::NotFound,
            input_city: input_city.into(),
            matched_municipality: None,
            matched_department: None,
            confidence: 0.0,
            suggestions: Vec::new(),
        }
    }

    /// Returns the match type.
    #[inline]
    #[must_use]
    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// Returns the city as the caller typed it.
    #[inline]
    #[must_use]
    pub fn input_city(&self) -> &str {
        &self.input_city
    }

    /// Returns the matched municipality, if any.
    #[inline]
    #[must_use]
    pub fn matched_municipality(&self) -> Option<&str> {
        self.matched_municipality.as_deref()
    }

    /// Returns the matched department, if any.
    #[inline]
    #[must_use]
    pub fn matched_department(&self) -> Option<&str> {
        self.matched_department.as_deref()
    }

    /// Returns the confidence in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Returns the ranked suggestions (best first).
    #[inline]
    #[must_use]
    pub fn suggestions(&self) -> &[MatchSuggestion] {
        &self.suggestions
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_zero_confidence() {
        let result = CityMatchResult::not_found("Xyzabc123");
        assert_eq!(result.match_type(), MatchType::NotFound);
        assert_eq!(result.confidence(), 0.0);
        assert!(result.matched_municipality().is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let entry = AdminDivisionEntry::new("05001", "Medellín", "Antioquia");
        let result = CityMatchResult::fuzzy(
            "Medelin",
            &entry,
            0.875,
            vec![MatchSuggestion::from_entry(&entry, 0.875)],
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["matchType"], "fuzzy");
        assert_eq!(json["matchedMunicipality"], "Medellín");
        assert_eq!(json["suggestions"][0]["similarity"], 0.875);
    }
}
