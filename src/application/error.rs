//! # Application Errors
//!
//! Error types for quote aggregation.
//!
//! Individual carrier failures never surface here: the aggregator absorbs
//! them and reports counts in its diagnostics. Only request-level failures
//! do.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Validation(String)            - Malformed request (400)
//! ├── Configuration(String)         - Server misconfiguration (500)
//! ├── Reference(ReferenceError)     - Reference table unavailable (500)
//! ├── Carrier(CarrierError)         - Carrier client setup failure (500)
//! └── Internal(String)              - Anything else (500)
//! ```
//!
//! # Examples
//!
//! ```
//! use shipping_quote::application::error::ApplicationError;
//!
//! let err = ApplicationError::validation("destination_city is required");
//! assert!(err.is_client_error());
//! assert_eq!(err.status_code(), 400);
//! ```

use crate::infrastructure::carriers::CarrierError;
use crate::infrastructure::reference::ReferenceError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The server is not configured to serve quotes.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The reference table could not be loaded.
    #[error("reference data error: {0}")]
    Reference(#[from] ReferenceError),

    /// The carrier client could not be used.
    #[error("carrier error: {0}")]
    Carrier(#[from] CarrierError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the caller is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.is_validation()
    }

    /// HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
