//! # Carrier Quote
//!
//! A normalized price for one carrier service and delivery type.

use crate::domain::value_objects::{CarrierId, DeliveryType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key under which quotes are de-duplicated.
pub type QuoteKey = (CarrierId, String, DeliveryType);

/// A normalized shipping quote.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::entities::CarrierQuote;
/// use shipping_quote::domain::value_objects::{CarrierId, DeliveryType};
/// use rust_decimal::Decimal;
///
/// let quote = CarrierQuote::new(
///     CarrierId::new("coordinadora"),
///     "ground",
///     "Terrestre",
///     DeliveryType::Domicile,
///     Decimal::new(12_500, 0),
///     "COP",
/// )
/// .with_estimated_days(3);
///
/// assert_eq!(quote.delivery_type_label(), "Domicilio");
/// assert_eq!(quote.estimated_days(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierQuote {
    carrier: CarrierId,
    service: String,
    service_display_name: String,
    delivery_type: DeliveryType,
    delivery_type_label: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    currency: String,
    estimated_days: Option<u32>,
    delivery_estimate: Option<String>,
}

impl CarrierQuote {
    /// Creates a quote without delivery estimates.
    #[must_use]
    pub fn new(
        carrier: CarrierId,
        service: impl Into<String>,
        service_display_name: impl Into<String>,
        delivery_type: DeliveryType,
        price: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            carrier,
            service: service.into(),
            service_display_name: service_display_name.into(),
            delivery_type,
            delivery_type_label: delivery_type.label().to_string(),
            price,
            currency: currency.into(),
            estimated_days: None,
            delivery_estimate: None,
        }
    }

    /// Sets the estimated transit days.
    #[must_use]
    pub fn with_estimated_days(mut self, days: u32) -> Self {
        self.estimated_days = Some(days);
        self
    }

    /// Sets the carrier's free-text delivery estimate.
    #[must_use]
    pub fn with_delivery_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.delivery_estimate = Some(estimate.into());
        self
    }

    /// Returns the carrier.
    #[inline]
    #[must_use]
    pub fn carrier(&self) -> &CarrierId {
        &self.carrier
    }

    /// Returns the raw service token.
    #[inline]
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the human-readable service name.
    #[inline]
    #[must_use]
    pub fn service_display_name(&self) -> &str {
        &self.service_display_name
    }

    /// Returns the delivery type.
    #[inline]
    #[must_use]
    pub fn delivery_type(&self) -> DeliveryType {
        self.delivery_type
    }

    /// Returns the delivery type label.
    #[inline]
    #[must_use]
    pub fn delivery_type_label(&self) -> &str {
        &self.delivery_type_label
    }

    /// Returns the price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the currency code.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the estimated transit days, if known.
    #[inline]
    #[must_use]
    pub fn estimated_days(&self) -> Option<u32> {
        self.estimated_days
    }

    /// Returns the carrier's delivery estimate text, if any.
    #[inline]
    #[must_use]
    pub fn delivery_estimate(&self) -> Option<&str> {
        self.delivery_estimate.as_deref()
    }

    /// Returns the de-duplication key.
    #[must_use]
    pub fn key(&self) -> QuoteKey {
        (self.carrier.clone(), self.service.clone(), self.delivery_type)
    }
}

impl fmt::Display for CarrierQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {} {} {}",
            self.carrier, self.service, self.delivery_type, self.price, self.currency
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_price_as_number() {
        let quote = CarrierQuote::new(
            CarrierId::new("servientrega"),
            "ground",
            "Terrestre",
            DeliveryType::Branch,
            Decimal::new(9_800, 0),
            "COP",
        )
        .with_delivery_estimate("2-3 días");

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["price"], 9800.0);
        assert_eq!(json["deliveryType"], "branch");
        assert_eq!(json["deliveryTypeLabel"], "Oficina");
        assert_eq!(json["deliveryEstimate"], "2-3 días");
    }

    #[test]
    fn key_ignores_price() {
        let a = CarrierQuote::new(
            CarrierId::new("tcc"),
            "ground",
            "Terrestre",
            DeliveryType::Domicile,
            Decimal::new(1, 0),
            "COP",
        );
        let b = CarrierQuote::new(
            CarrierId::new("tcc"),
            "ground",
            "Terrestre",
            DeliveryType::Domicile,
            Decimal::new(2, 0),
            "COP",
        );
        assert_eq!(a.key(), b.key());
    }
}
