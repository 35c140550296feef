//! # Domain Services
//!
//! Synchronous, in-memory domain logic.
//!
//! - [`FuzzyCityResolver`]: free-text city to canonical division code
//! - [`DepartmentCodeMapper`]: department or province to carrier state code
//! - [`AdminDivisionIndex`]: queryable municipality reference index
//! - [`service_catalog`]: ground-service allow-list and display names

pub mod city_resolver;
pub mod department_mapper;
pub mod division_index;
pub mod service_catalog;
pub mod similarity;
pub mod text;

pub use city_resolver::{CityResolution, FuzzyCityResolver, ResolverConfig};
pub use department_mapper::DepartmentCodeMapper;
pub use division_index::{AdminDivisionIndex, DivisionLookup, IndexError, IndexedEntry};
