//! # Quote Aggregator
//!
//! Orchestrates destination resolution and the carrier fan-out.
//!
//! One request produces exactly `carriers × shipment_types` upstream calls.
//! All calls run concurrently and are joined with an await-all barrier: a
//! failed or timed-out call is logged and excluded, never retried, and never
//! cancels its siblings.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::ranking::rank_quotes;
use crate::domain::entities::{
    AdminDivisionEntry, AggregationDiagnostics, CarrierQuote, DestinationSpec, Dimensions,
    OriginAddress, PackageSpec, QuoteRequest, QuoteResponse, RateRequestTemplate,
    ResolvedDestination,
};
use crate::domain::services::service_catalog::{display_name, is_ground_service};
use crate::domain::services::{DepartmentCodeMapper, FuzzyCityResolver};
use crate::domain::value_objects::{CarrierId, DivisionCode, ShipmentType};
use crate::infrastructure::carriers::{
    CarrierError, CarrierResult, RateProvider, RawCarrierResponse,
};
use crate::infrastructure::reference::AdminDivisionCache;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::Instrument;

/// Default carrier allow-list.
pub const DEFAULT_CARRIERS: [&str; 3] = ["coordinadora", "servientrega", "interrapidisimo"];

/// Default per-call timeout in milliseconds.
pub const DEFAULT_PER_CALL_TIMEOUT_MS: u64 = 10_000;

/// Package attributes used when the request omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageDefaults {
    /// Weight in kilograms.
    pub weight_kg: Decimal,
    /// Declared value in the quoting currency.
    pub declared_value: Decimal,
    /// Dimensions in centimetres.
    pub dimensions: Dimensions,
}

impl Default for PackageDefaults {
    fn default() -> Self {
        Self {
            weight_kg: Decimal::new(5, 1),
            declared_value: Decimal::new(100_000, 0),
            dimensions: Dimensions::default(),
        }
    }
}

/// Configuration for quote aggregation.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// Carriers queried for every request.
    pub carriers: Vec<CarrierId>,
    /// Shipment types queried per carrier.
    pub shipment_types: Vec<ShipmentType>,
    /// Timeout applied to each upstream call.
    pub per_call_timeout_ms: u64,
    /// Shipping origin.
    pub origin: OriginAddress,
    /// Package attributes for omitted request fields.
    pub package_defaults: PackageDefaults,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            carriers: DEFAULT_CARRIERS.iter().map(|c| CarrierId::new(c)).collect(),
            shipment_types: ShipmentType::ALL.to_vec(),
            per_call_timeout_ms: DEFAULT_PER_CALL_TIMEOUT_MS,
            origin: OriginAddress::default(),
            package_defaults: PackageDefaults::default(),
        }
    }
}

impl AggregationConfig {
    /// Sets the carrier allow-list.
    #[must_use]
    pub fn with_carriers<I, S>(mut self, carriers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.carriers = carriers.into_iter().map(CarrierId::new).collect();
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_per_call_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_call_timeout_ms = timeout_ms;
        self
    }

    /// Sets the shipping origin.
    #[must_use]
    pub fn with_origin(mut self, origin: OriginAddress) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the package defaults.
    #[must_use]
    pub fn with_package_defaults(mut self, defaults: PackageDefaults) -> Self {
        self.package_defaults = defaults;
        self
    }

    /// Number of upstream calls per request.
    #[must_use]
    pub fn fan_out(&self) -> usize {
        self.carriers.len() * self.shipment_types.len()
    }
}

/// Resolves destinations and aggregates carrier quotes.
#[derive(Debug)]
pub struct QuoteAggregator {
    provider: Arc<dyn RateProvider>,
    references: Arc<AdminDivisionCache>,
    resolver: FuzzyCityResolver,
    mapper: DepartmentCodeMapper,
    config: AggregationConfig,
}

impl QuoteAggregator {
    /// Creates a new aggregator.
    #[must_use]
    pub fn new(
        provider: Arc<dyn RateProvider>,
        references: Arc<AdminDivisionCache>,
        resolver: FuzzyCityResolver,
        mapper: DepartmentCodeMapper,
        config: AggregationConfig,
    ) -> Self {
        Self {
            provider,
            references,
            resolver,
            mapper,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the reference cache.
    #[must_use]
    pub fn references(&self) -> &Arc<AdminDivisionCache> {
        &self.references
    }

    /// Returns true if the rate provider has credentials.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Produces ranked quotes for `request`.
    ///
    /// Carrier failures never fail the request; when every call fails the
    /// response simply has no quotes.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Validation` for missing or non-positive input
    /// - `ApplicationError::Configuration` when carrier credentials are missing
    /// - `ApplicationError::Reference` when the reference table cannot load
    pub async fn aggregate(&self, request: &QuoteRequest) -> ApplicationResult<QuoteResponse> {
        let (city, department) = validate(request)?;
        let span = tracing::info_span!("aggregate", city = city, department = department);
        self.aggregate_validated(request, city, department)
            .instrument(span)
            .await
    }

    async fn aggregate_validated(
        &self,
        request: &QuoteRequest,
        city: &str,
        department: &str,
    ) -> ApplicationResult<QuoteResponse> {
        if !self.provider.is_configured() {
            tracing::error!(provider = self.provider.name(), "carrier credentials missing");
            return Err(ApplicationError::configuration(
                "carrier rating API credentials are not configured",
            ));
        }

        let started = Instant::now();
        let index = self.references.index().await?;
        let resolution = self.resolver.resolve(index.as_ref(), city, Some(department));
        let state_code = self.state_code(department, resolution.entry.as_ref());
        let destination = resolved_destination(
            city,
            department,
            &state_code,
            &resolution.code,
            resolution.entry.as_ref(),
        );
        let (division_code, match_info) = resolution.into_parts();

        let template = Arc::new(RateRequestTemplate::new(
            self.config.origin.clone(),
            DestinationSpec {
                city_name: destination.city.clone(),
                city_code: division_code,
                state_code,
                postal_code: request
                    .destination_postal_code
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string),
            },
            self.package(request),
        ));

        let outcomes = self.collect_from_carriers(&template).await;
        let (quotes, diagnostics) = normalize_outcomes(outcomes);
        let ranked = rank_quotes(quotes);

        tracing::info!(
            match_type = %match_info.match_type(),
            division_code = %destination.division_code,
            state_code = %destination.state_code,
            calls = diagnostics.calls_dispatched,
            failed = diagnostics.calls_failed,
            lines = diagnostics.lines_received,
            discarded = diagnostics.lines_discarded,
            quotes = ranked.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "quotes aggregated"
        );

        Ok(QuoteResponse::from_sorted(
            ranked,
            destination,
            match_info,
            diagnostics,
        ))
    }

    /// Prefers the request's department; falls back to the matched entry's.
    fn state_code(&self, department: &str, entry: Option<&AdminDivisionEntry>) -> String {
        self.mapper
            .lookup(department)
            .or_else(|| entry.and_then(|e| self.mapper.lookup(e.department_name())))
            .map(str::to_string)
            .unwrap_or_else(|| self.mapper.map_to_state_code(department))
    }

    fn package(&self, request: &QuoteRequest) -> PackageSpec {
        let defaults = &self.config.package_defaults;
        PackageSpec {
            weight_kg: request.package_weight.unwrap_or(defaults.weight_kg),
            declared_value: request.declared_value.unwrap_or(defaults.declared_value),
            dimensions: defaults.dimensions.clone(),
        }
    }

    /// Dispatches every (carrier, shipment type) call and awaits all of them.
    async fn collect_from_carriers(
        &self,
        template: &Arc<RateRequestTemplate>,
    ) -> Vec<(CarrierId, ShipmentType, CarrierResult<RawCarrierResponse>)> {
        let per_call_timeout_ms = self.config.per_call_timeout_ms;
        let mut handles = Vec::with_capacity(self.config.fan_out());

        for carrier in &self.config.carriers {
            for &shipment_type in &self.config.shipment_types {
                let provider = Arc::clone(&self.provider);
                let template = Arc::clone(template);
                let task_carrier = carrier.clone();

                let handle = tokio::spawn(
                    async move {
                        let call = provider.quote(&task_carrier, shipment_type, &template);
                        match timeout(Duration::from_millis(per_call_timeout_ms), call).await {
                            Ok(result) => result,
                            Err(_) => Err(CarrierError::timeout_with_duration(
                                "carrier call timed out",
                                per_call_timeout_ms,
                            )),
                        }
                    }
                    .in_current_span(),
                );
                handles.push((carrier.clone(), shipment_type, handle));
            }
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (carrier, shipment_type, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(CarrierError::internal(format!("task panicked: {}", e))),
            };
            outcomes.push((carrier, shipment_type, result));
        }
        outcomes
    }
}

/// Checks required fields and returns trimmed city and department.
fn validate(request: &QuoteRequest) -> ApplicationResult<(&str, &str)> {
    let city = request
        .destination_city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApplicationError::validation("destination_city is required"))?;
    let department = request
        .destination_department
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApplicationError::validation("destination_department is required"))?;

    if request.package_weight.is_some_and(|w| w <= Decimal::ZERO) {
        return Err(ApplicationError::validation(
            "package_weight must be positive",
        ));
    }
    if request.declared_value.is_some_and(|v| v <= Decimal::ZERO) {
        return Err(ApplicationError::validation(
            "declared_value must be positive",
        ));
    }
    Ok((city, department))
}

/// Prefers the matched canonical names over the caller's spelling.
fn resolved_destination(
    city: &str,
    department: &str,
    state_code: &str,
    division_code: &DivisionCode,
    entry: Option<&AdminDivisionEntry>,
) -> ResolvedDestination {
    let (city, department) = match entry {
        Some(e) => (e.municipality_name(), e.department_name()),
        None => (city, department),
    };
    ResolvedDestination {
        city: city.to_string(),
        department: department.to_string(),
        state_code: state_code.to_string(),
        division_code: division_code.clone(),
    }
}

/// Keeps ground lines from successful calls and counts everything else.
fn normalize_outcomes(
    outcomes: Vec<(CarrierId, ShipmentType, CarrierResult<RawCarrierResponse>)>,
) -> (Vec<CarrierQuote>, AggregationDiagnostics) {
    let mut diagnostics = AggregationDiagnostics {
        calls_dispatched: outcomes.len(),
        ..Default::default()
    };
    let mut quotes = Vec::new();

    for (carrier, shipment_type, outcome) in outcomes {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                diagnostics.calls_failed += 1;
                tracing::warn!(
                    carrier = %carrier,
                    shipment_type = shipment_type.code(),
                    error = %e,
                    "carrier call failed, excluding"
                );
                continue;
            }
        };

        diagnostics.calls_succeeded += 1;
        diagnostics.lines_received += response.lines.len();
        let delivery_type = response.shipment_type.delivery_type();

        for line in response.lines {
            if !is_ground_service(&line.service) {
                diagnostics.lines_discarded += 1;
                tracing::debug!(
                    carrier = %line.carrier,
                    service = %line.service,
                    "non-ground service discarded"
                );
                continue;
            }

            let mut quote = CarrierQuote::new(
                line.carrier,
                line.service.clone(),
                display_name(&line.service),
                delivery_type,
                line.total_price,
                line.currency,
            );
            if let Some(days) = line.estimated_days {
                quote = quote.with_estimated_days(days);
            }
            if let Some(estimate) = line.delivery_estimate {
                quote = quote.with_delivery_estimate(estimate);
            }
            quotes.push(quote);
        }
    }

    (quotes, diagnostics)
}
