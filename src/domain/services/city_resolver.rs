//! # Fuzzy City Resolver
//!
//! Resolves a free-text city, optionally with a department hint, to a
//! canonical division code.
//!
//! Resolution runs in strict order and stops at the first hit:
//!
//! 1. exact name, accents preserved, case-insensitive
//! 2. exact name after folding, department hint loosely matched
//! 3. similarity match at or above the configured threshold, scored over the
//!    whole table; the department hint only orders equal scores
//! 4. fallback to the configured default division
//!
//! The resolver never fails. Shipping is still attempted with noisy
//! addresses, so every outcome carries a [`CityMatchResult`] explaining how
//! the code was chosen.

use crate::domain::entities::{AdminDivisionEntry, CityMatchResult, MatchSuggestion};
use crate::domain::services::division_index::{DivisionLookup, IndexedEntry};
use crate::domain::services::similarity::similarity;
use crate::domain::services::text::normalize;
use crate::domain::value_objects::DivisionCode;
use serde::{Deserialize, Serialize};

/// Default minimum similarity for a fuzzy match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.70;

/// Default number of suggestions reported.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Division code of the capital district, used when nothing matches.
pub const DEFAULT_FALLBACK_CODE: &str = "11001";

/// Tunables for city resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum similarity in `[0, 1]` for a fuzzy match.
    pub similarity_threshold: f64,
    /// Maximum suggestions returned with a fuzzy match.
    pub max_suggestions: usize,
    /// Code returned when nothing matches.
    pub fallback_code: DivisionCode,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            fallback_code: DivisionCode::new(DEFAULT_FALLBACK_CODE),
        }
    }
}

impl ResolverConfig {
    /// Sets the similarity threshold, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Sets the maximum number of suggestions.
    #[must_use]
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Sets the fallback code.
    #[must_use]
    pub fn with_fallback_code(mut self, code: impl Into<String>) -> Self {
        self.fallback_code = DivisionCode::new(code);
        self
    }
}

/// A resolved city: the code to quote with, the matched entry and the report.
#[derive(Debug, Clone, PartialEq)]
pub struct CityResolution {
    /// Code to send to carriers.
    pub code: DivisionCode,
    /// Matched reference entry, absent on fallback.
    pub entry: Option<AdminDivisionEntry>,
    /// Match diagnostics.
    pub report: CityMatchResult,
}

impl CityResolution {
    /// Splits into `(code, report)`.
    #[must_use]
    pub fn into_parts(self) -> (DivisionCode, CityMatchResult) {
        (self.code, self.report)
    }
}

/// Resolves free-text cities against a [`DivisionLookup`].
#[derive(Debug, Clone, Default)]
pub struct FuzzyCityResolver {
    config: ResolverConfig,
}

impl FuzzyCityResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves `input_city` within `index`.
    #[must_use]
    pub fn resolve(
        &self,
        index: &dyn DivisionLookup,
        input_city: &str,
        department_hint: Option<&str>,
    ) -> CityResolution {
        let folded_city = normalize(input_city);
        if folded_city.is_empty() {
            tracing::debug!("empty destination city, using fallback division");
            return self.fallback(input_city);
        }

        let folded_hint = department_hint.map(normalize).filter(|h| !h.is_empty());

        if let Some(hit) = Self::exact_hit(index, input_city, folded_hint.as_deref()) {
            return Self::exact_resolution(input_city, hit);
        }

        if let Some(hit) = Self::folded_hit(index, &folded_city, folded_hint.as_deref()) {
            return Self::exact_resolution(input_city, hit);
        }

        self.fuzzy(index, input_city, &folded_city, folded_hint.as_deref())
            .unwrap_or_else(|| {
                tracing::warn!(
                    city = input_city,
                    department = department_hint.unwrap_or_default(),
                    fallback = %self.config.fallback_code,
                    "city not resolved, using fallback division"
                );
                self.fallback(input_city)
            })
    }

    /// Step 1: case-insensitive, accents kept. A hint only disambiguates.
    fn exact_hit<'a>(
        index: &'a dyn DivisionLookup,
        input_city: &str,
        folded_hint: Option<&str>,
    ) -> Option<&'a IndexedEntry> {
        let hits = index.exact(input_city);
        folded_hint
            .and_then(|hint| hits.iter().copied().find(|e| e.department_matches(hint)))
            .or_else(|| hits.first().copied())
    }

    /// Step 2: folded equality; with a hint the department must match loosely.
    fn folded_hit<'a>(
        index: &'a dyn DivisionLookup,
        folded_city: &str,
        folded_hint: Option<&str>,
    ) -> Option<&'a IndexedEntry> {
        index
            .exact_folded(folded_city)
            .into_iter()
            .find(|e| folded_hint.is_none_or(|hint| e.department_matches(hint)))
    }

    /// Step 3: similarity scan over every entry.
    ///
    /// Equal scores put hint-matching departments first, then keep table
    /// order (the sort is stable).
    fn fuzzy(
        &self,
        index: &dyn DivisionLookup,
        input_city: &str,
        folded_city: &str,
        folded_hint: Option<&str>,
    ) -> Option<CityResolution> {
        let mut scored: Vec<(&IndexedEntry, f64)> = index
            .fuzzy_candidates()
            .into_iter()
            .map(|e| (e, similarity(folded_city, e.folded_municipality())))
            .filter(|(_, score)| *score >= self.config.similarity_threshold)
            .collect();
        let in_hint =
            |e: &IndexedEntry| folded_hint.is_some_and(|hint| e.department_matches(hint));
        scored.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| in_hint(b.0).cmp(&in_hint(a.0)))
        });

        let (best, score) = scored.first().copied()?;
        let suggestions = scored
            .iter()
            .take(self.config.max_suggestions)
            .map(|(e, s)| MatchSuggestion::from_entry(e.entry(), *s))
            .collect();

        tracing::debug!(
            city = input_city,
            matched = best.entry().municipality_name(),
            similarity = score,
            "fuzzy city match"
        );

        Some(CityResolution {
            code: best.entry().canonical_code().clone(),
            entry: Some(best.entry().clone()),
            report: CityMatchResult::fuzzy(input_city, best.entry(), score, suggestions),
        })
    }

    fn exact_resolution(input_city: &str, hit: &IndexedEntry) -> CityResolution {
        CityResolution {
            code: hit.entry().canonical_code().clone(),
            entry: Some(hit.entry().clone()),
            report: CityMatchResult::exact(input_city, hit.entry()),
        }
    }

    fn fallback(&self, input_city: &str) -> CityResolution {
        CityResolution {
            code: self.config.fallback_code.clone(),
            entry: None,
            report: CityMatchResult::not_found(input_city),
        }
    }
}
