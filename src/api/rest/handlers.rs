//! # REST Handlers
//!
//! Request and response envelopes plus the axum handler functions.
//!
//! Every body carries a `success` flag. Failures are
//! `{ "success": false, "error": "..." }` with 400 for caller mistakes and
//! 500 for everything else.

use crate::application::error::ApplicationError;
use crate::application::services::QuoteAggregator;
use crate::domain::entities::{QuoteRequest, QuoteResponse};
use axum::extract::State;
use axum::{BoxError, Json};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Quote pipeline.
    pub aggregator: Arc<QuoteAggregator>,
}

impl AppState {
    /// Creates the state.
    #[must_use]
    pub fn new(aggregator: Arc<QuoteAggregator>) -> Self {
        Self { aggregator }
    }
}

/// Successful quote body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteEnvelope {
    /// Always true.
    pub success: bool,
    /// Quote lists, destination and match report.
    #[serde(flatten)]
    pub response: QuoteResponse,
}

/// Failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
}

impl ErrorResponse {
    /// Creates a failure body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Reference refresh body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Always true.
    pub success: bool,
    /// Entries in the new snapshot.
    pub entries: usize,
}

/// Health body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Entries in the reference snapshot, if loaded.
    pub reference_entries: Option<usize>,
    /// Whether carrier credentials are present.
    pub carriers_configured: bool,
}

/// Error wrapper that renders as a failure envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an API error.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }
        // Internal details stay in the logs.
        let message = match &err {
            ApplicationError::Validation(message) | ApplicationError::Configuration(message) => {
                message.clone()
            }
            _ => "internal server error".to_string(),
        };
        Self::new(status, message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

/// Renders a handler panic as a 500 failure envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = detail, "handler panicked");
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}

/// Renders middleware failures, such as the request deadline, as failure
/// envelopes.
pub async fn middleware_error(error: BoxError) -> ApiError {
    if error.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("request deadline exceeded");
        return ApiError::new(StatusCode::GATEWAY_TIMEOUT, "request timed out");
    }
    tracing::error!(error = %error, "middleware failure");
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

/// `POST /api/v1/shipping/quote`
///
/// # Errors
///
/// Returns 400 for malformed or incomplete bodies and 500 for server-side
/// failures.
pub async fn quote_shipping(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteEnvelope>, ApiError> {
    let Json(request) = payload?;
    let response = state.aggregator.aggregate(&request).await?;
    Ok(Json(QuoteEnvelope {
        success: true,
        response,
    }))
}

/// `POST /api/v1/reference/admin-divisions/refresh`
///
/// # Errors
///
/// Returns 500 if the reload fails; the previous snapshot stays active.
pub async fn refresh_admin_divisions(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let index = state
        .aggregator
        .references()
        .refresh()
        .await
        .map_err(ApplicationError::from)?;
    Ok(Json(RefreshResponse {
        success: true,
        entries: index.len(),
    }))
}

/// `GET /api/v1/health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        reference_entries: state.aggregator.references().snapshot().map(|i| i.len()),
        carriers_configured: state.aggregator.is_configured(),
    })
}
