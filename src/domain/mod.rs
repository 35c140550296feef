//! # Domain Layer
//!
//! Reference data, city resolution, and the quote model. Everything here is
//! synchronous and free of I/O.

pub mod entities;
pub mod services;
pub mod value_objects;
