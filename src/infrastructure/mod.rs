//! # Infrastructure Layer
//!
//! Adapters for external systems.
//!
//! - [`carriers`]: rating API client and the [`carriers::RateProvider`] port
//! - [`reference`]: municipality reference table sources and cache

pub mod carriers;
pub mod reference;
