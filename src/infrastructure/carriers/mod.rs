//! # Carrier Integrations
//!
//! - [`RateProvider`]: port used by the aggregator
//! - [`CarrierRateClient`]: rating API adapter
//! - [`CarrierError`]: per-call failure taxonomy

pub mod error;
pub mod http_client;
pub mod rating_client;
pub mod traits;
pub mod wire;

pub use error::{CarrierError, CarrierResult};
pub use rating_client::{CarrierApiConfig, CarrierRateClient};
pub use traits::{RateLine, RateProvider, RawCarrierResponse};
