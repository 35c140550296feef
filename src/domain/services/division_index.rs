//! # Admin Division Index
//!
//! In-memory index over the municipality reference table.
//!
//! The resolver talks to the index through [`DivisionLookup`]. Fuzzy scoring
//! covers every entry; a department hint never narrows the candidate set.

use crate::domain::entities::AdminDivisionEntry;
use crate::domain::services::text::{loosely_contains, normalize};
use crate::domain::value_objects::DivisionCode;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while building an index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Two entries share a canonical code.
    #[error("duplicate canonical code: {0}")]
    DuplicateCode(DivisionCode),
}

/// A reference entry with its folded search keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntry {
    entry: AdminDivisionEntry,
    lowered_municipality: String,
    folded_municipality: String,
    folded_department: String,
}

impl IndexedEntry {
    fn new(entry: AdminDivisionEntry) -> Self {
        Self {
            lowered_municipality: entry.municipality_name().trim().to_lowercase(),
            folded_municipality: normalize(entry.municipality_name()),
            folded_department: normalize(entry.department_name()),
            entry,
        }
    }

    /// Returns the reference entry.
    #[inline]
    #[must_use]
    pub fn entry(&self) -> &AdminDivisionEntry {
        &self.entry
    }

    /// Municipality name, diacritics stripped and lower-cased.
    #[inline]
    #[must_use]
    pub fn folded_municipality(&self) -> &str {
        &self.folded_municipality
    }

    /// Department name, diacritics stripped and lower-cased.
    #[inline]
    #[must_use]
    pub fn folded_department(&self) -> &str {
        &self.folded_department
    }

    /// True if the folded department hint and this entry's department
    /// contain one another.
    #[must_use]
    pub fn department_matches(&self, folded_hint: &str) -> bool {
        loosely_contains(&self.folded_department, folded_hint)
    }
}

/// Query interface the city resolver needs from a reference index.
///
/// Every method returns entries in reference-table order.
pub trait DivisionLookup: Send + Sync {
    /// Entries whose municipality equals `city` ignoring case, accents kept.
    fn exact(&self, city: &str) -> Vec<&IndexedEntry>;

    /// Entries whose folded municipality equals the folded `city`.
    fn exact_folded(&self, folded_city: &str) -> Vec<&IndexedEntry>;

    /// Entries scored for a fuzzy match: the whole table.
    fn fuzzy_candidates(&self) -> Vec<&IndexedEntry>;
}

/// Immutable index built once from the reference table.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::entities::AdminDivisionEntry;
/// use shipping_quote::domain::services::division_index::{AdminDivisionIndex, DivisionLookup};
///
/// let index = AdminDivisionIndex::new(vec![
///     AdminDivisionEntry::new("05001", "Medellín", "Antioquia"),
///     AdminDivisionEntry::new("76001", "Cali", "Valle del Cauca"),
/// ])
/// .unwrap();
///
/// assert_eq!(index.len(), 2);
/// assert_eq!(index.exact_folded("medellin").len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdminDivisionIndex {
    entries: Vec<IndexedEntry>,
    codes: HashSet<DivisionCode>,
    by_lowered: HashMap<String, Vec<usize>>,
    by_folded: HashMap<String, Vec<usize>>,
}

impl AdminDivisionIndex {
    /// Builds the index, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DuplicateCode`] if two entries share a code.
    pub fn new(entries: Vec<AdminDivisionEntry>) -> Result<Self, IndexError> {
        let mut index = Self {
            entries: Vec::with_capacity(entries.len()),
            ..Self::default()
        };

        for (position, entry) in entries.into_iter().enumerate() {
            let indexed = IndexedEntry::new(entry);
            let code = indexed.entry.canonical_code().clone();
            if !index.codes.insert(code.clone()) {
                return Err(IndexError::DuplicateCode(code));
            }
            index
                .by_lowered
                .entry(indexed.lowered_municipality.clone())
                .or_default()
                .push(position);
            index
                .by_folded
                .entry(indexed.folded_municipality.clone())
                .or_default()
                .push(position);
            index.entries.push(indexed);
        }

        Ok(index)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &AdminDivisionEntry> {
        self.entries.iter().map(IndexedEntry::entry)
    }

    fn resolve_positions(&self, positions: Option<&Vec<usize>>) -> Vec<&IndexedEntry> {
        positions
            .map(|list| list.iter().filter_map(|&p| self.entries.get(p)).collect())
            .unwrap_or_default()
    }
}

impl DivisionLookup for AdminDivisionIndex {
    fn exact(&self, city: &str) -> Vec<&IndexedEntry> {
        self.resolve_positions(self.by_lowered.get(&city.trim().to_lowercase()))
    }

    fn exact_folded(&self, folded_city: &str) -> Vec<&IndexedEntry> {
        self.resolve_positions(self.by_folded.get(folded_city))
    }

    fn fuzzy_candidates(&self) -> Vec<&IndexedEntry> {
        self.entries.iter().collect()
    }
}
