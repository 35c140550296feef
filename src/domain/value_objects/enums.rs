//! # Domain Enums
//!
//! Enumeration types for shipping-quote concepts.
//!
//! - [`ShipmentType`] - Address-to-address or address-to-branch request flag
//! - [`DeliveryType`] - Whether a quote delivers to the door or to a branch
//! - [`MatchType`] - Outcome class of a city resolution
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEnumError {
    /// The value does not name any variant.
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
    /// The numeric code does not name any variant.
    #[error("invalid {0} code: {1}")]
    InvalidCode(&'static str, u8),
}

/// Carrier API shipment type.
///
/// The numeric code is what the rating API expects in `shipment.type`.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::value_objects::enums::{DeliveryType, ShipmentType};
///
/// assert_eq!(ShipmentType::AddressToAddress.code(), 1);
/// assert_eq!(ShipmentType::AddressToBranch.delivery_type(), DeliveryType::Branch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ShipmentType {
    /// Pickup at origin, delivery at the recipient's address.
    AddressToAddress = 1,
    /// Pickup at origin, delivery at a carrier branch.
    AddressToBranch = 2,
}

impl ShipmentType {
    /// Every shipment type, in dispatch order.
    pub const ALL: [ShipmentType; 2] = [Self::AddressToAddress, Self::AddressToBranch];

    /// Returns the carrier API numeric code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the delivery type quotes of this shipment type belong to.
    #[inline]
    #[must_use]
    pub const fn delivery_type(self) -> DeliveryType {
        match self {
            Self::AddressToAddress => DeliveryType::Domicile,
            Self::AddressToBranch => DeliveryType::Branch,
        }
    }
}

impl TryFrom<u8> for ShipmentType {
    type Error = ParseEnumError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::AddressToAddress),
            2 => Ok(Self::AddressToBranch),
            other => Err(ParseEnumError::InvalidCode("ShipmentType", other)),
        }
    }
}

impl fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressToAddress => write!(f, "ADDRESS_TO_ADDRESS"),
            Self::AddressToBranch => write!(f, "ADDRESS_TO_BRANCH"),
        }
    }
}

impl FromStr for ShipmentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "ADDRESS_TO_ADDRESS" | "1" => Ok(Self::AddressToAddress),
            "ADDRESS_TO_BRANCH" | "2" => Ok(Self::AddressToBranch),
            _ => Err(ParseEnumError::InvalidValue("ShipmentType", s.to_string())),
        }
    }
}

/// Where the carrier hands the parcel over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    /// Delivered to the recipient's address.
    Domicile,
    /// Collected by the recipient at a carrier branch.
    Branch,
}

impl DeliveryType {
    /// Human-readable label shown next to a quote.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Domicile => "Domicilio",
            Self::Branch => "Oficina",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domicile => write!(f, "DOMICILE"),
            Self::Branch => write!(f, "BRANCH"),
        }
    }
}

impl FromStr for DeliveryType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DOMICILE" | "DOMICILIO" => Ok(Self::Domicile),
            "BRANCH" | "OFICINA" => Ok(Self::Branch),
            _ => Err(ParseEnumError::InvalidValue("DeliveryType", s.to_string())),
        }
    }
}

/// How a free-text city was matched against the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Exact name match, with or without accents.
    Exact,
    /// Similarity match above the configured threshold.
    Fuzzy,
    /// Nothing matched; a fallback division was used.
    NotFound,
}

impl MatchType {
    /// Returns true if a reference entry was matched.
    #[inline]
    #[must_use]
    pub const fn is_match(self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "EXACT"),
            Self::Fuzzy => write!(f, "FUZZY"),
            Self::NotFound => write!(f, "NOT_FOUND"),
        }
    }
}

impl FromStr for MatchType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "EXACT" => Ok(Self::Exact),
            "FUZZY" => Ok(Self::Fuzzy),
            "NOT_FOUND" | "NOTFOUND" => Ok(Self::NotFound),
            _ => Err(ParseEnumError::InvalidValue("MatchType", s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn shipment_type_codes() {
        assert_eq!(ShipmentType::AddressToAddress.code(), 1);
        assert_eq!(ShipmentType::AddressToBranch.code(), 2);
        assert_eq!(ShipmentType::try_from(2).unwrap(), ShipmentType::AddressToBranch);
        assert!(ShipmentType::try_from(3).is_err());
    }

    #[test]
    fn shipment_type_maps_to_delivery_type() {
        assert_eq!(
            ShipmentType::AddressToAddress.delivery_type(),
            DeliveryType::Domicile
        );
        assert_eq!(
            ShipmentType::AddressToBranch.delivery_type(),
            DeliveryType::Branch
        );
    }

    #[test]
    fn shipment_type_from_str() {
        assert_eq!(
            "address-to-branch".parse::<ShipmentType>().unwrap(),
            ShipmentType::AddressToBranch
        );
        assert_eq!("1".parse::<ShipmentType>().unwrap(), ShipmentType::AddressToAddress);
        assert!("air".parse::<ShipmentType>().is_err());
    }

    #[test]
    fn delivery_type_labels() {
        assert_eq!(DeliveryType::Domicile.label(), "Domicilio");
        assert_eq!(DeliveryType::Branch.label(), "Oficina");
        assert_eq!("oficina".parse::<DeliveryType>().unwrap(), DeliveryType::Branch);
    }

    #[test]
    fn match_type_serde() {
        let json = serde_json::to_string(&MatchType::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
        assert!(MatchType::Fuzzy.is_match());
        assert!(!MatchType::NotFound.is_match());
    }
}
