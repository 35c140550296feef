//! # HTTP Client
//!
//! Thin wrapper over `reqwest` for the rating API.
//!
//! The rating API reports business errors in the body, sometimes with a
//! non-2xx status, so responses are returned as status plus raw text and the
//! caller decides how to parse them. Transport failures are mapped to
//! [`CarrierError`] here.

use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// A response body with its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Body text.
    pub body: String,
}

/// HTTP client with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a client with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> CarrierResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| CarrierError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// POSTs `body` as JSON and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Timeout` or `CarrierError::Connection` on
    /// transport failure.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        bearer_token: Option<&str>,
    ) -> CarrierResult<RawResponse> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.map_reqwest_error(e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        Ok(RawResponse { status, body })
    }

    /// Maps a reqwest error to a `CarrierError`.
    fn map_reqwest_error(&self, error: reqwest::Error) -> CarrierError {
        if error.is_timeout() {
            CarrierError::timeout_with_duration("Request timed out", self.timeout_ms)
        } else if error.is_connect() {
            CarrierError::connection(format!("Connection failed: {}", error))
        } else {
            CarrierError::connection(format!("HTTP request failed: {}", error))
        }
    }
}

/// Maps a non-success status without a parseable error envelope.
#[must_use]
pub fn map_status_error(status: StatusCode, body: &str) -> CarrierError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CarrierError::authentication(format!("Authentication failed: {}", body))
        }
        StatusCode::TOO_MANY_REQUESTS => CarrierError::rate_limited("Rate limit exceeded"),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CarrierError::timeout(format!("Upstream timeout ({})", status))
        }
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE => {
            CarrierError::connection(format!("Server error ({}): {}", status, body))
        }
        _ => CarrierError::protocol(format!("HTTP error ({}): {}", status, body)),
    }
}
