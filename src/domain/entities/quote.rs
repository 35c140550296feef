//! # Quote Request and Response
//!
//! Inbound shipping quote request and the aggregated response returned to
//! the caller.

use crate::domain::entities::{CarrierQuote, CityMatchResult};
use crate::domain::value_objects::{DeliveryType, DivisionCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shipping quote request.
///
/// `destination_city` and `destination_department` are optional at the type
/// level so a missing value can be reported as a client error rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Free-text destination city.
    #[serde(default)]
    pub destination_city: Option<String>,
    /// Free-text destination department or province code.
    #[serde(default)]
    pub destination_department: Option<String>,
    /// Destination postal code.
    #[serde(default)]
    pub destination_postal_code: Option<String>,
    /// Package weight in kilograms.
    #[serde(default)]
    pub package_weight: Option<Decimal>,
    /// Declared value in the quote currency.
    #[serde(default)]
    pub declared_value: Option<Decimal>,
}

impl QuoteRequest {
    /// Creates a request for a city and department.
    #[must_use]
    pub fn new(city: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            destination_city: Some(city.into()),
            destination_department: Some(department.into()),
            ..Self::default()
        }
    }

    /// Sets the postal code.
    #[must_use]
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.destination_postal_code = Some(postal_code.into());
        self
    }

    /// Sets the package weight.
    #[must_use]
    pub fn with_package_weight(mut self, weight_kg: Decimal) -> Self {
        self.package_weight = Some(weight_kg);
        self
    }

    /// Sets the declared value.
    #[must_use]
    pub fn with_declared_value(mut self, value: Decimal) -> Self {
        self.declared_value = Some(value);
        self
    }
}

/// The destination the quotes were computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDestination {
    /// City name, canonical when the city was matched.
    pub city: String,
    /// Department name, canonical when the city was matched.
    pub department: String,
    /// Carrier API state code.
    pub state_code: String,
    /// Canonical division code.
    #[serde(rename = "dane_code")]
    pub division_code: DivisionCode,
}

/// Counters describing one aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationDiagnostics {
    /// Upstream calls issued.
    pub calls_dispatched: usize,
    /// Calls that returned a parseable rate list.
    pub calls_succeeded: usize,
    /// Calls that failed for any reason, timeouts included.
    pub calls_failed: usize,
    /// Rate lines received across successful calls.
    pub lines_received: usize,
    /// Lines dropped because they were not ground services.
    pub lines_discarded: usize,
}

/// Ranked, de-duplicated quotes for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// All quotes, ascending by price.
    pub quotes: Vec<CarrierQuote>,
    /// Door-delivery quotes, ascending by price.
    #[serde(rename = "domicilio")]
    pub domicile_quotes: Vec<CarrierQuote>,
    /// Branch-pickup quotes, ascending by price.
    #[serde(rename = "oficina")]
    pub branch_quotes: Vec<CarrierQuote>,
    /// Resolved destination.
    #[serde(rename = "destination")]
    pub resolved_destination: ResolvedDestination,
    /// City resolution diagnostics.
    #[serde(rename = "matchInfo")]
    pub match_info: CityMatchResult,
    /// Aggregation counters, kept out of the public body.
    #[serde(skip)]
    pub diagnostics: AggregationDiagnostics,
}

impl QuoteResponse {
    /// Builds a response from quotes already sorted by price.
    #[must_use]
    pub fn from_sorted(
        quotes: Vec<CarrierQuote>,
        resolved_destination: ResolvedDestination,
        match_info: CityMatchResult,
        diagnostics: AggregationDiagnostics,
    ) -> Self {
        let (domicile_quotes, branch_quotes) = quotes
            .iter()
            .cloned()
            .partition(|q| q.delivery_type() == DeliveryType::Domicile);

        Self {
            quotes,
            domicile_quotes,
            branch_quotes,
            resolved_destination,
            match_info,
            diagnostics,
        }
    }

    /// Returns the cheapest quote, if any.
    #[must_use]
    pub fn cheapest(&self) -> Option<&CarrierQuote> {
        self.quotes.first()
    }

    /// Returns true if no carrier produced a usable quote.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
