//! # Carrier Errors
//!
//! Error types for carrier rating calls.
//!
//! Every (carrier, shipment type) call fails independently; these errors are
//! logged and excluded from the aggregated quotes rather than propagated.
//!
//! # Examples
//!
//! ```
//! use shipping_quote::infrastructure::carriers::error::CarrierError;
//!
//! let error = CarrierError::timeout("Request timed out after 10000ms");
//! assert!(error.is_timeout());
//!
//! let error = CarrierError::rejected("Destination not covered", Some("1125".to_string()));
//! assert_eq!(error.carrier_message(), Some("Destination not covered"));
//! ```

use thiserror::Error;

/// Error type for carrier rating operations.
#[derive(Debug, Clone, Error)]
pub enum CarrierError {
    /// Request timed out.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error (DNS, refused, reset).
    #[error("carrier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Credentials rejected by the rating API.
    #[error("carrier authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("carrier rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// The rating API answered with an error envelope.
    #[error("carrier rejected request: {message}")]
    Rejected {
        /// Message reported by the carrier.
        message: String,
        /// Carrier-specific error code.
        error_code: Option<String>,
    },

    /// Body could not be parsed.
    #[error("carrier protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Client-side failure (request construction, task failure).
    #[error("carrier internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl CarrierError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates a rejection carrying the carrier's message.
    #[must_use]
    pub fn rejected(message: impl Into<String>, error_code: Option<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            error_code,
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if the request itself (or its credentials) was at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Rejected { .. })
    }

    /// Returns true if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns the carrier's own error message, if any.
    #[must_use]
    pub fn carrier_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the carrier error code, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for carrier operations.
pub type CarrierResult<T> = Result<T, CarrierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_not_a_client_error() {
        let error = CarrierError::timeout_with_duration("slow", 10_000);
        assert!(error.is_timeout());
        assert!(!error.is_client_error());
    }

    #[test]
    fn rejection_carries_carrier_message() {
        let error = CarrierError::rejected("Invalid destination", Some("1125".to_string()));
        assert_eq!(error.carrier_message(), Some("Invalid destination"));
        assert_eq!(error.error_code(), Some("1125"));
        assert!(error.is_client_error());
        assert!(!error.is_timeout());
    }

    #[test]
    fn protocol_error_has_no_carrier_message() {
        let error = CarrierError::protocol("expected value at line 1");
        assert!(error.carrier_message().is_none());
        assert!(error.to_string().contains("protocol"));
    }

    #[test]
    fn display_format() {
        let error = CarrierError::connection("dns error");
        let display = error.to_string();
        assert!(display.contains("connection"));
        assert!(display.contains("dns error"));
    }
}
