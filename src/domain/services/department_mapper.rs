//! # Department Code Mapper
//!
//! Translates department names, storefront province codes and carrier codes
//! into the carrier rating API's state-code vocabulary.
//!
//! Lookup order:
//!
//! 1. the upper-cased input against the province table, searching both
//!    columns: storefront province codes (`ANT`) first, then carrier state
//!    codes (`AN`), which pass through unchanged
//! 2. the folded input against full department names: equality first, then
//!    containment in either direction, in table order
//! 3. the capital district code, with the miss logged

use crate::domain::services::text::{loosely_contains, normalize};

/// Carrier state code of the capital district.
pub const CAPITAL_STATE_CODE: &str = "DC";

/// Storefront province code to carrier state code.
const PROVINCE_CODES: &[(&str, &str)] = &[
    ("DC", "DC"),
    ("AMA", "AM"),
    ("ANT", "AN"),
    ("ARA", "AR"),
    ("ATL", "AT"),
    ("BOL", "BL"),
    ("BOY", "BY"),
    ("CAL", "CL"),
    ("CAQ", "CQ"),
    ("CAS", "CS"),
    ("CAU", "CA"),
    ("CES", "CE"),
    ("CHO", "CH"),
    ("COR", "CO"),
    ("CUN", "CU"),
    ("GUA", "GN"),
    ("GUV", "GV"),
    ("HUI", "HU"),
    ("LAG", "LG"),
    ("MAG", "MA"),
    ("MET", "ME"),
    ("NAR", "NA"),
    ("NSA", "NS"),
    ("PUT", "PU"),
    ("QUI", "QD"),
    ("RIS", "RI"),
    ("SAP", "SA"),
    ("SAN", "ST"),
    ("SUC", "SU"),
    ("TOL", "TO"),
    ("VAC", "VC"),
    ("VAU", "VP"),
    ("VID", "VD"),
];

/// Folded department name to carrier state code.
///
/// Names that contain another name ("norte de santander", "valle del
/// cauca") come before the name they contain.
const DEPARTMENT_NAMES: &[(&str, &str)] = &[
    ("bogota", "DC"),
    ("distrito capital", "DC"),
    ("amazonas", "AM"),
    ("antioquia", "AN"),
    ("arauca", "AR"),
    ("atlantico", "AT"),
    ("bolivar", "BL"),
    ("boyaca", "BY"),
    ("caldas", "CL"),
    ("caqueta", "CQ"),
    ("casanare", "CS"),
    ("valle del cauca", "VC"),
    ("cauca", "CA"),
    ("cesar", "CE"),
    ("choco", "CH"),
    ("cordoba", "CO"),
    ("cundinamarca", "CU"),
    ("guainia", "GN"),
    ("guaviare", "GV"),
    ("huila", "HU"),
    ("la guajira", "LG"),
    ("magdalena", "MA"),
    ("meta", "ME"),
    ("narino", "NA"),
    ("norte de santander", "NS"),
    ("putumayo", "PU"),
    ("quindio", "QD"),
    ("risaralda", "RI"),
    ("san andres", "SA"),
    ("santander", "ST"),
    ("sucre", "SU"),
    ("tolima", "TO"),
    ("vaupes", "VP"),
    ("vichada", "VD"),
];

/// Maps free-text departments to carrier state codes.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::services::department_mapper::DepartmentCodeMapper;
///
/// let mapper = DepartmentCodeMapper::default();
/// assert_eq!(mapper.map_to_state_code("ANT"), "AN");
/// assert_eq!(mapper.map_to_state_code("Bogotá D.C."), "DC");
/// assert_eq!(mapper.map_to_state_code("Norte de Santander"), "NS");
/// ```
#[derive(Debug, Clone)]
pub struct DepartmentCodeMapper {
    fallback_state_code: String,
}

impl Default for DepartmentCodeMapper {
    fn default() -> Self {
        Self::new(CAPITAL_STATE_CODE)
    }
}

impl DepartmentCodeMapper {
    /// Creates a mapper with the given fallback code.
    #[must_use]
    pub fn new(fallback_state_code: impl Into<String>) -> Self {
        Self {
            fallback_state_code: fallback_state_code.into(),
        }
    }

    /// Returns the fallback state code.
    #[must_use]
    pub fn fallback_state_code(&self) -> &str {
        &self.fallback_state_code
    }

    /// Maps a department name or province code to a carrier state code.
    ///
    /// Never fails: unknown input yields the fallback code.
    #[must_use]
    pub fn map_to_state_code(&self, department_or_province: &str) -> String {
        self.lookup(department_or_province)
            .map(str::to_string)
            .unwrap_or_else(|| {
                tracing::warn!(
                    department = department_or_province,
                    fallback = %self.fallback_state_code,
                    "department not mapped, using fallback state code"
                );
                self.fallback_state_code.clone()
            })
    }

    /// Returns the mapped code, or `None` when the input is unknown.
    #[must_use]
    pub fn lookup(&self, department_or_province: &str) -> Option<&'static str> {
        let upper = department_or_province.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }

        if let Some(code) = Self::province_code(&upper) {
            return Some(code);
        }

        let folded = normalize(department_or_province);
        DEPARTMENT_NAMES
            .iter()
            .find(|(name, _)| *name == folded)
            .or_else(|| {
                DEPARTMENT_NAMES
                    .iter()
                    .find(|(name, _)| loosely_contains(name, &folded))
            })
            .map(|(_, code)| *code)
    }

    /// Storefront column first, then the carrier column.
    fn province_code(upper: &str) -> Option<&'static str> {
        PROVINCE_CODES
            .iter()
            .find(|(province, _)| *province == upper)
            .or_else(|| PROVINCE_CODES.iter().find(|(_, code)| *code == upper))
            .map(|(_, code)| *code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storefront_codes() {
        let mapper = DepartmentCodeMapper::default();
        assert_eq!(mapper.map_to_state_code("vac"), "VC");
        assert_eq!(mapper.map_to_state_code(" dc "), "DC");
        assert_eq!(mapper.map_to_state_code("SAP"), "SA");
    }

    #[test]
    fn carrier_codes_pass_through() {
        let mapper = DepartmentCodeMapper::default();
        assert_eq!(mapper.map_to_state_code("AN"), "AN");
        assert_eq!(mapper.map_to_state_code("ns"), "NS");
    }

    #[test]
    fn full_names_with_accents() {
        let mapper = DepartmentCodeMapper::default();
        assert_eq!(mapper.map_to_state_code("Atlántico"), "AT");
        assert_eq!(mapper.map_to_state_code("Nariño"), "NA");
        assert_eq!(mapper.map_to_state_code("QUINDÍO"), "QD");
    }

    #[test]
    fn equality_beats_containment() {
        let mapper = DepartmentCodeMapper::default();
        assert_eq!(mapper.map_to_state_code("Cauca"), "CA");
        assert_eq!(mapper.map_to_state_code("Santander"), "ST");
        assert_eq!(mapper.map_to_state_code("Valle del Cauca"), "VC");
    }

    #[test]
    fn containment_either_direction() {
        let mapper = DepartmentCodeMapper::default();
        assert_eq!(mapper.map_to_state_code("Bogota DC"), "DC");
        assert_eq!(mapper.map_to_state_code("Guajira"), "LG");
        assert_eq!(
            mapper.map_to_state_code("Archipiélago de San Andrés, Providencia y Santa Catalina"),
            "SA"
        );
    }

    #[test]
    fn unknown_falls_back_to_capital() {
        let mapper = DepartmentCodeMapper::default();
        assert_eq!(mapper.map_to_state_code("Atlantis Province"), "DC");
        assert_eq!(mapper.map_to_state_code(""), "DC");
        assert!(mapper.lookup("Atlantis Province").is_none());
    }

    #[test]
    fn custom_fallback() {
        let mapper = DepartmentCodeMapper::new("AN");
        assert_eq!(mapper.map_to_state_code("???"), "AN");
        assert_eq!(mapper.fallback_state_code(), "AN");
    }
}
