//! # Service Catalog
//!
//! Classifies raw carrier service tokens. Only ground (road transport)
//! services are quoted; express and air tiers are always excluded, even when
//! their name also carries a ground token (`express_standard`).

use crate::domain::services::text::title_case;

/// Tokens identifying ground services.
const GROUND_TOKENS: &[&str] = &[
    "ground",
    "terrestre",
    "standard",
    "estandar",
    "economico",
    "economy",
    "mercancia",
    "paqueteria",
];

/// Tokens that disqualify a service regardless of other tokens.
const EXCLUDED_TOKENS: &[&str] = &[
    "express",
    "expres",
    "air",
    "aereo",
    "priority",
    "next_day",
    "same_day",
    "overnight",
];

/// Raw service token to display name.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("ground", "Terrestre"),
    ("terrestre", "Terrestre"),
    ("standard", "Estándar"),
    ("estandar", "Estándar"),
    ("economico", "Económico"),
    ("economy", "Económico"),
    ("mercancia", "Mercancía Terrestre"),
    ("ground_cod", "Terrestre Contraentrega"),
    ("paqueteria", "Paquetería"),
];

/// Returns true if `service` is a ground service.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::services::service_catalog::is_ground_service;
///
/// assert!(is_ground_service("ground"));
/// assert!(is_ground_service("Ground_COD"));
/// assert!(!is_ground_service("express"));
/// assert!(!is_ground_service("express_standard"));
/// ```
#[must_use]
pub fn is_ground_service(service: &str) -> bool {
    let service = service.trim().to_lowercase();
    if service.is_empty() || EXCLUDED_TOKENS.iter().any(|t| service.contains(t)) {
        return false;
    }
    GROUND_TOKENS.iter().any(|t| service.contains(t))
}

/// Returns the human-readable name of a service token.
///
/// Unknown tokens are title-cased.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::services::service_catalog::display_name;
///
/// assert_eq!(display_name("ground"), "Terrestre");
/// assert_eq!(display_name("ground_plus"), "Ground Plus");
/// ```
#[must_use]
pub fn display_name(service: &str) -> String {
    let key = service.trim().to_lowercase();
    DISPLAY_NAMES
        .iter()
        .find(|(token, _)| *token == key)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| title_case(service))
}
