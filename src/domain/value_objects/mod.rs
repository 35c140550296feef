//! # Value Objects
//!
//! Immutable types with domain semantics.
//!
//! ## Identity Types
//!
//! - [`CarrierId`]: Carrier slug used by the rating API
//! - [`DivisionCode`]: Canonical municipality code
//!
//! ## Domain Enums
//!
//! - [`ShipmentType`]: Rating API shipment flag (1 or 2)
//! - [`DeliveryType`]: Domicile or branch delivery
//! - [`MatchType`]: City resolution outcome

pub mod enums;
pub mod ids;

pub use enums::{DeliveryType, MatchType, ParseEnumError, ShipmentType};
pub use ids::{CarrierId, DivisionCode};
