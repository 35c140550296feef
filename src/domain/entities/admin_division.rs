//! # Admin Division Entry
//!
//! One row of the municipality reference table.

use crate::domain::value_objects::DivisionCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A municipality with its department and canonical division code.
///
/// Reference data: loaded from a reference store and never mutated by the
/// quoting pipeline.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::entities::AdminDivisionEntry;
///
/// let entry = AdminDivisionEntry::new("05001", "Medellín", "Antioquia");
/// assert_eq!(entry.canonical_code().as_str(), "05001");
/// assert_eq!(entry.municipality_name(), "Medellín");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminDivisionEntry {
    /// Unique canonical code.
    #[serde(alias = "dane_code", alias = "code")]
    canonical_code: DivisionCode,
    /// Municipality name as published, accents included.
    #[serde(alias = "municipality", alias = "municipio")]
    municipality_name: String,
    /// Department the municipality belongs to.
    #[serde(alias = "department", alias = "departamento")]
    department_name: String,
}

impl AdminDivisionEntry {
    /// Creates a new reference entry.
    #[must_use]
    pub fn new(
        canonical_code: impl Into<String>,
        municipality_name: impl Into<String>,
        department_name: impl Into<String>,
    ) -> Self {
        Self {
            canonical_code: DivisionCode::new(canonical_code),
            municipality_name: municipality_name.into(),
            department_name: department_name.into(),
        }
    }

    /// Returns the canonical division code.
    #[inline]
    #[must_use]
    pub fn canonical_code(&self) -> &DivisionCode {
        &self.canonical_code
    }

    /// Returns the municipality name.
    #[inline]
    #[must_use]
    pub fn municipality_name(&self) -> &str {
        &self.municipality_name
    }

    /// Returns the department name.
    #[inline]
    #[must_use]
    pub fn department_name(&self) -> &str {
        &self.department_name
    }
}

impl fmt::Display for AdminDivisionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) [{}]",
            self.municipality_name, self.department_name, self.canonical_code
        )
    }
}
