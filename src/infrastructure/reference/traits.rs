//! # Reference Repository Trait
//!
//! Port definition for the municipality reference store.
//!
//! # Examples
//!
//! ```ignore
//! use shipping_quote::infrastructure::reference::AdminDivisionRepository;
//!
//! async fn count(repo: &impl AdminDivisionRepository) -> usize {
//!     repo.load_all().await.map(|e| e.len()).unwrap_or(0)
//! }
//! ```

use crate::domain::entities::AdminDivisionEntry;
use crate::infrastructure::reference::error::ReferenceResult;
use async_trait::async_trait;
use std::fmt;

/// Read-only source of admin division entries.
#[async_trait]
pub trait AdminDivisionRepository: Send + Sync + fmt::Debug {
    /// Loads every entry, in the store's canonical order.
    ///
    /// # Errors
    ///
    /// Returns a `ReferenceError` if the store cannot be read or parsed.
    async fn load_all(&self) -> ReferenceResult<Vec<AdminDivisionEntry>>;

    /// Short description of the source, for logs.
    fn source_name(&self) -> String;
}
