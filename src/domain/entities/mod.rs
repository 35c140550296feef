//! # Domain Entities
//!
//! ## Reference Data
//!
//! - [`AdminDivisionEntry`]: Municipality with department and canonical code
//!
//! ## Resolution
//!
//! - [`CityMatchResult`]: Match report for a free-text city
//!
//! ## Quoting
//!
//! - [`RateRequestTemplate`]: Canonical rate request, stamped per carrier
//! - [`CarrierQuote`]: Normalized quote line
//! - [`QuoteRequest`] / [`QuoteResponse`]: Inbound request and aggregated result

pub mod admin_division;
pub mod carrier_quote;
pub mod city_match;
pub mod quote;
pub mod rate_request;

pub use admin_division::AdminDivisionEntry;
pub use carrier_quote::{CarrierQuote, QuoteKey};
pub use city_match::{CityMatchResult, MatchSuggestion};
pub use quote::{AggregationDiagnostics, QuoteRequest, QuoteResponse, ResolvedDestination};
pub use rate_request::{
    CarrierRateRequest, DestinationSpec, Dimensions, OriginAddress, PackageSpec,
    RateRequestTemplate,
};
