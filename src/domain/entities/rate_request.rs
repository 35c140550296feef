//! # Rate Request
//!
//! The canonical rate request built once per quote request, and the
//! per-(carrier, shipment type) requests stamped from it.
//!
//! Every field is owned, so a [`CarrierRateRequest`] never shares mutable
//! state with the template it was cloned from or with its siblings.

use crate::domain::value_objects::{CarrierId, DivisionCode, ShipmentType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Package dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Length in cm.
    pub length: u32,
    /// Width in cm.
    pub width: u32,
    /// Height in cm.
    pub height: u32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            length: 20,
            width: 15,
            height: 10,
        }
    }
}

/// Physical and declared attributes of the parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Weight in kilograms.
    pub weight_kg: Decimal,
    /// Declared value in the quote currency.
    pub declared_value: Decimal,
    /// Dimensions in centimetres.
    pub dimensions: Dimensions,
}

/// The shipping origin.
///
/// Injected through configuration so each deployment (or tenant) can ship
/// from its own warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginAddress {
    /// Sender name.
    pub name: String,
    /// Sender company.
    pub company: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Street.
    pub street: String,
    /// Street number.
    pub number: String,
    /// District or neighbourhood.
    pub district: String,
    /// Canonical division code of the origin city.
    pub city_code: DivisionCode,
    /// Carrier API state code of the origin.
    pub state_code: String,
    /// Postal code.
    pub postal_code: String,
}

impl Default for OriginAddress {
    fn default() -> Self {
        Self {
            name: "Despachos".to_string(),
            company: "Bodega Principal".to_string(),
            email: "despachos@example.com".to_string(),
            phone: "3000000000".to_string(),
            street: "Calle 13".to_string(),
            number: "68-50".to_string(),
            district: "Puente Aranda".to_string(),
            city_code: DivisionCode::new("11001"),
            state_code: "DC".to_string(),
            postal_code: "111611".to_string(),
        }
    }
}

/// Resolved destination geography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationSpec {
    /// City name sent for display purposes.
    pub city_name: String,
    /// Canonical division code.
    pub city_code: DivisionCode,
    /// Carrier API state code.
    pub state_code: String,
    /// Postal code, when the caller supplied one.
    pub postal_code: Option<String>,
}

/// The canonical rate request shared by every carrier call of one quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRequestTemplate {
    origin: OriginAddress,
    destination: DestinationSpec,
    package: PackageSpec,
}

impl RateRequestTemplate {
    /// Creates a template.
    #[must_use]
    pub fn new(origin: OriginAddress, destination: DestinationSpec, package: PackageSpec) -> Self {
        Self {
            origin,
            destination,
            package,
        }
    }

    /// Returns the origin address.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &OriginAddress {
        &self.origin
    }

    /// Returns the destination.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &DestinationSpec {
        &self.destination
    }

    /// Returns the package.
    #[inline]
    #[must_use]
    pub fn package(&self) -> &PackageSpec {
        &self.package
    }

    /// Origin division code.
    #[must_use]
    pub fn origin_code(&self) -> &DivisionCode {
        &self.origin.city_code
    }

    /// Destination division code.
    #[must_use]
    pub fn destination_code(&self) -> &DivisionCode {
        &self.destination.city_code
    }

    /// Clones the template and stamps a carrier and shipment type on it.
    #[must_use]
    pub fn stamp(&self, carrier: CarrierId, shipment_type: ShipmentType) -> CarrierRateRequest {
        CarrierRateRequest {
            template: self.clone(),
            carrier,
            shipment_type,
        }
    }
}

/// A rate request addressed to one carrier with one shipment type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierRateRequest {
    template: RateRequestTemplate,
    carrier: CarrierId,
    shipment_type: ShipmentType,
}

impl CarrierRateRequest {
    /// Returns the carrier.
    #[inline]
    #[must_use]
    pub fn carrier(&self) -> &CarrierId {
        &self.carrier
    }

    /// Returns the shipment type.
    #[inline]
    #[must_use]
    pub fn shipment_type(&self) -> ShipmentType {
        self.shipment_type
    }

    /// Returns the stamped template.
    #[inline]
    #[must_use]
    pub fn template(&self) -> &RateRequestTemplate {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    fn template() -> RateRequestTemplate {
        RateRequestTemplate::new(
            OriginAddress::default(),
            DestinationSpec {
                city_name: "Medellín".to_string(),
                city_code: DivisionCode::new("05001"),
                state_code: "ANT".to_string(),
                postal_code: None,
            },
            PackageSpec {
                weight_kg: dec(5, 1),
                declared_value: dec(100_000, 0),
                dimensions: Dimensions::default(),
            },
        )
    }

    #[test]
    fn stamped_requests_are_independent_copies() {
        let base = template();
        let mut first = base.stamp(CarrierId::new("coordinadora"), ShipmentType::AddressToAddress);
        let second = base.stamp(CarrierId::new("servientrega"), ShipmentType::AddressToBranch);

        first.template.package.weight_kg = dec(30, 0);

        assert_eq!(second.template().package().weight_kg, dec(5, 1));
        assert_eq!(base.package().weight_kg, dec(5, 1));
        assert_eq!(second.shipment_type().code(), 2);
    }

    #[test]
    fn codes() {
        let base = template();
        assert_eq!(base.origin_code().as_str(), "11001");
        assert_eq!(base.destination_code().as_str(), "05001");
    }
}
