//! # Carrier Rate Client
//!
//! [`RateProvider`] backed by the external rating HTTP API.
//!
//! One call per (carrier, shipment type). No retries happen here: a failed
//! call is reported to the aggregator, which excludes it.

use crate::domain::entities::RateRequestTemplate;
use crate::domain::value_objects::{CarrierId, ShipmentType};
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::http_client::HttpClient;
use crate::infrastructure::carriers::traits::{RateProvider, RawCarrierResponse};
use crate::infrastructure::carriers::wire::{RateRequestBody, parse_rate_response};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Default rating API timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection settings for the rating API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierApiConfig {
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Path of the rate endpoint.
    pub rate_path: String,
    /// Bearer token. Quotes are refused while this is missing.
    pub api_key: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Currency requested from carriers.
    pub currency: String,
    /// ISO country code of origin and destination.
    pub country: String,
}

impl Default for CarrierApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.envia.com".to_string(),
            rate_path: "/ship/rate/".to_string(),
            api_key: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            currency: "COP".to_string(),
            country: "CO".to_string(),
        }
    }
}

impl fmt::Debug for CarrierApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierApiConfig")
            .field("base_url", &self.base_url)
            .field("rate_path", &self.rate_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .field("currency", &self.currency)
            .field("country", &self.country)
            .finish()
    }
}

impl CarrierApiConfig {
    /// Creates a configuration for `base_url` with defaults elsewhere.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns true if an API key is present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Full URL of the rate endpoint.
    #[must_use]
    pub fn rate_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.rate_path.trim_start_matches('/')
        )
    }
}

/// Rating API client.
#[derive(Debug, Clone)]
pub struct CarrierRateClient {
    http: HttpClient,
    config: CarrierApiConfig,
    rate_url: String,
}

impl CarrierRateClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the HTTP client cannot be built.
    pub fn new(config: CarrierApiConfig) -> CarrierResult<Self> {
        let http = HttpClient::new(config.timeout_ms)?;
        let rate_url = config.rate_url();
        Ok(Self {
            http,
            config,
            rate_url,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CarrierApiConfig {
        &self.config
    }
}

#[async_trait]
impl RateProvider for CarrierRateClient {
    fn name(&self) -> &'static str {
        "carrier-rating-api"
    }

    fn is_configured(&self) -> bool {
        self.config.has_credentials()
    }

    async fn quote(
        &self,
        carrier: &CarrierId,
        shipment_type: ShipmentType,
        template: &RateRequestTemplate,
    ) -> CarrierResult<RawCarrierResponse> {
        let token = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| CarrierError::authentication("API key not configured"))?;

        let request = template.stamp(carrier.clone(), shipment_type);
        let body =
            RateRequestBody::from_request(&request, &self.config.country, &self.config.currency);

        let started = Instant::now();
        let response = self.http.post_json(&self.rate_url, &body, Some(token)).await?;
        tracing::debug!(
            carrier = %carrier,
            shipment_type = shipment_type.code(),
            status = response.status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "rating API responded"
        );

        parse_rate_response(&response, carrier, shipment_type, &self.config.currency)
    }
}
