//! # REST API
//!
//! HTTP surface of the quote engine, built on axum.
//!
//! # Endpoints
//!
//! - `POST /api/v1/shipping/quote` - Aggregate carrier quotes for a destination
//! - `POST /api/v1/reference/admin-divisions/refresh` - Reload the reference table
//! - `GET /api/v1/health` - Health check
//!
//! # Usage
//!
//! ```ignore
//! use shipping_quote::api::rest::{create_router, AppState};
//!
//! let router = create_router(AppState::new(aggregator));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    ApiError, AppState, ErrorResponse, HealthResponse, QuoteEnvelope, RefreshResponse,
};
pub use routes::create_router;
