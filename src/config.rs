//! # Configuration
//!
//! Layered application settings.
//!
//! Sources, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`shipping-quote.toml` unless overridden)
//! 3. environment variables prefixed `SHIPPING_QUOTE__`, with `__`
//!    separating nested keys, e.g. `SHIPPING_QUOTE__CARRIER_API__API_KEY`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first.
//!
//! Environment values are kept as strings and converted on demand, so
//! division codes with leading zeros survive.

use crate::application::services::{AggregationConfig, PackageDefaults, QuoteAggregator};
use crate::application::services::quote_aggregation::{
    DEFAULT_CARRIERS, DEFAULT_PER_CALL_TIMEOUT_MS,
};
use crate::domain::entities::OriginAddress;
use crate::domain::services::city_resolver::{
    DEFAULT_FALLBACK_CODE, DEFAULT_MAX_SUGGESTIONS, DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::domain::services::department_mapper::CAPITAL_STATE_CODE;
use crate::domain::services::{DepartmentCodeMapper, FuzzyCityResolver, ResolverConfig};
use crate::infrastructure::carriers::{CarrierApiConfig, CarrierError, CarrierRateClient};
use crate::infrastructure::reference::{
    AdminDivisionCache, AdminDivisionRepository, InMemoryAdminDivisionRepository,
    JsonFileAdminDivisionRepository,
};
use crate::telemetry::LogFormat;
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Default configuration file name, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "shipping-quote";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SHIPPING_QUOTE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
}

/// Fan-out settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Carrier allow-list. A comma-separated string is accepted.
    #[serde(deserialize_with = "list_or_csv")]
    pub carriers: Vec<String>,
    /// Timeout for each upstream call.
    pub per_call_timeout_ms: u64,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            carriers: DEFAULT_CARRIERS.iter().map(|c| (*c).to_string()).collect(),
            per_call_timeout_ms: DEFAULT_PER_CALL_TIMEOUT_MS,
        }
    }
}

/// City and department matching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum fuzzy similarity.
    pub similarity_threshold: f64,
    /// Maximum suggestions per match.
    pub max_suggestions: usize,
    /// Division code used when a city is not found.
    pub fallback_code: String,
    /// State code used when a department is not mapped.
    pub fallback_state_code: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            fallback_code: DEFAULT_FALLBACK_CODE.to_string(),
            fallback_state_code: CAPITAL_STATE_CODE.to_string(),
        }
    }
}

impl MatchingConfig {
    /// Resolver settings.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::default()
            .with_threshold(self.similarity_threshold)
            .with_max_suggestions(self.max_suggestions)
            .with_fallback_code(self.fallback_code.clone())
    }
}

/// Reference table settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// JSON file with the reference table. The built-in table is used when
    /// unset.
    pub source_path: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server.
    pub server: ServerConfig,
    /// Logging.
    pub logging: LoggingConfig,
    /// Carrier rating API.
    pub carrier_api: CarrierApiConfig,
    /// Fan-out.
    pub aggregation: AggregationSettings,
    /// Matching.
    pub matching: MatchingConfig,
    /// Package attributes for omitted request fields.
    pub package_defaults: PackageDefaults,
    /// Shipping origin.
    pub origin: OriginAddress,
    /// Reference table.
    pub reference: ReferenceConfig,
}

impl AppConfig {
    /// Loads `.env`, the default file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_from(None, default_environment())
    }

    /// Loads from an explicit file and environment source.
    ///
    /// `file` defaults to [`DEFAULT_CONFIG_FILE`] and is optional either way.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or a value is invalid.
    pub fn load_from(file: Option<&Path>, environment: Environment) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(false),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: Self = Config::builder()
            .add_source(file_source)
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.matching.similarity_threshold) {
            return Err(ConfigError::invalid(
                "matching.similarity_threshold must be within [0, 1]",
            ));
        }
        if self.aggregation.carriers.iter().all(|c| c.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "aggregation.carriers must name at least one carrier",
            ));
        }
        if self.aggregation.per_call_timeout_ms == 0 || self.carrier_api.timeout_ms == 0 {
            return Err(ConfigError::invalid("timeouts must be positive"));
        }
        if self.package_defaults.weight_kg <= rust_decimal::Decimal::ZERO {
            return Err(ConfigError::invalid(
                "package_defaults.weight_kg must be positive",
            ));
        }
        Ok(())
    }

    /// Fan-out settings for the aggregator.
    #[must_use]
    pub fn aggregation_config(&self) -> AggregationConfig {
        AggregationConfig::default()
            .with_carriers(
                self.aggregation
                    .carriers
                    .iter()
                    .filter(|c| !c.trim().is_empty()),
            )
            .with_per_call_timeout(self.aggregation.per_call_timeout_ms)
            .with_origin(self.origin.clone())
            .with_package_defaults(self.package_defaults.clone())
    }

    /// The configured reference source.
    #[must_use]
    pub fn reference_repository(&self) -> Arc<dyn AdminDivisionRepository> {
        match &self.reference.source_path {
            Some(path) => Arc::new(JsonFileAdminDivisionRepository::new(path.clone())),
            None => Arc::new(InMemoryAdminDivisionRepository::with_seed()),
        }
    }

    /// Wires the full quote pipeline.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the HTTP client cannot be built.
    pub fn build_aggregator(&self) -> Result<QuoteAggregator, CarrierError> {
        let client = CarrierRateClient::new(self.carrier_api.clone())?;
        if !self.carrier_api.has_credentials() {
            tracing::warn!("carrier API key not configured; quote requests will fail");
        }

        Ok(QuoteAggregator::new(
            Arc::new(client),
            Arc::new(AdminDivisionCache::new(self.reference_repository())),
            FuzzyCityResolver::new(self.matching.resolver_config()),
            DepartmentCodeMapper::new(self.matching.fallback_state_code.clone()),
            self.aggregation_config(),
        ))
    }
}

/// The process environment source.
#[must_use]
pub fn default_environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match ListOrCsv::deserialize(deserializer)? {
        ListOrCsv::List(items) => items,
        ListOrCsv::Csv(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    })
}
