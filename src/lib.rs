//! # shipping-quote
//!
//! Destination resolution and multi-carrier shipping rate aggregation.
//!
//! A quote request names a destination city and department in free text.
//! The engine resolves the city to a canonical division code (exact,
//! accent-insensitive, then fuzzy), maps the department to the carrier
//! API's state code, fans out one rate call per (carrier, shipment type)
//! concurrently, and returns the cheapest ground quote per carrier service
//! and delivery type, sorted by price.
//!
//! # Layers
//!
//! - [`domain`]: entities, value objects and pure matching logic
//! - [`application`]: the quote aggregator and ranking
//! - [`infrastructure`]: rating API client and reference table sources
//! - [`api`]: axum REST surface
//! - [`config`] and [`telemetry`]: process setup
//!
//! # Example
//!
//! ```ignore
//! use shipping_quote::config::AppConfig;
//! use shipping_quote::domain::entities::QuoteRequest;
//!
//! let aggregator = AppConfig::load()?.build_aggregator()?;
//! let response = aggregator
//!     .aggregate(&QuoteRequest::new("Medelin", "Antioquia"))
//!     .await?;
//! println!("{:?}", response.cheapest());
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
