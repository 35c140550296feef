//! # Identifiers
//!
//! String-based identifiers for carriers and administrative divisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Carrier slug as understood by the rating API (e.g. `coordinadora`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarrierId(String);

impl CarrierId {
    /// Creates a carrier id, normalizing to trimmed lower case.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_lowercase())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CarrierId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Canonical administrative division code (DANE municipality code).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DivisionCode(String);

impl DivisionCode {
    /// Creates a division code from its textual form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DivisionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DivisionCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_id_is_normalized() {
        assert_eq!(CarrierId::new("  Coordinadora ").as_str(), "coordinadora");
    }

    #[test]
    fn division_code_serializes_transparently() {
        let code = DivisionCode::new("05001");
        assert_eq!(serde_json::to_string(&code).ok().as_deref(), Some("\"05001\""));
    }
}
