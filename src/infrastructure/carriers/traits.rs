//! # Rate Provider Trait
//!
//! Port definition for the carrier rating API.
//!
//! The aggregator only sees [`RateProvider`], so tests and alternative
//! rating backends can be swapped in without touching orchestration.

use crate::domain::entities::RateRequestTemplate;
use crate::domain::value_objects::{CarrierId, ShipmentType};
use crate::infrastructure::carriers::error::CarrierResult;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One priced service line returned by the rating API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLine {
    /// Carrier that priced the line.
    pub carrier: CarrierId,
    /// Raw service token (e.g. `ground`, `express`).
    pub service: String,
    /// Carrier's own description of the service, if any.
    pub service_description: Option<String>,
    /// Total price.
    pub total_price: Decimal,
    /// Currency code.
    pub currency: String,
    /// Free-text delivery estimate.
    pub delivery_estimate: Option<String>,
    /// Estimated transit days.
    pub estimated_days: Option<u32>,
}

/// The successful outcome of one (carrier, shipment type) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCarrierResponse {
    /// Carrier requested.
    pub carrier: CarrierId,
    /// Shipment type requested.
    pub shipment_type: ShipmentType,
    /// Lines returned, possibly empty.
    pub lines: Vec<RateLine>,
}

impl RawCarrierResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(carrier: CarrierId, shipment_type: ShipmentType, lines: Vec<RateLine>) -> Self {
        Self {
            carrier,
            shipment_type,
            lines,
        }
    }
}

impl fmt::Display for RawCarrierResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}: {} lines",
            self.carrier,
            self.shipment_type,
            self.lines.len()
        )
    }
}

/// A source of carrier rates.
#[async_trait]
pub trait RateProvider: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns false when upstream credentials are missing.
    fn is_configured(&self) -> bool {
        true
    }

    /// Requests rates for one carrier and shipment type.
    ///
    /// Implementations stamp their own copy of `template`; it is never
    /// mutated.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` for transport failures, unparseable bodies
    /// and carrier error envelopes.
    async fn quote(
        &self,
        carrier: &CarrierId,
        shipment_type: ShipmentType,
        template: &RateRequestTemplate,
    ) -> CarrierResult<RawCarrierResponse>;
}
