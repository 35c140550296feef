//! # Reference Data
//!
//! Municipality reference table: storage port, built-in seed, JSON file
//! source and the process-wide index cache.

pub mod cache;
pub mod error;
pub mod in_memory;
pub mod json_file;
pub mod seed;
pub mod traits;

pub use cache::AdminDivisionCache;
pub use error::{ReferenceError, ReferenceResult};
pub use in_memory::InMemoryAdminDivisionRepository;
pub use json_file::JsonFileAdminDivisionRepository;
pub use traits::AdminDivisionRepository;
