//! # Application Services
//!
//! - [`QuoteAggregator`]: destination resolution plus concurrent carrier fan-out
//! - [`ranking`]: cheapest-per-key de-duplication and price ordering

pub mod quote_aggregation;
pub mod ranking;

pub use quote_aggregation::{AggregationConfig, PackageDefaults, QuoteAggregator};
pub use ranking::{dedupe_cheapest, rank_quotes};
