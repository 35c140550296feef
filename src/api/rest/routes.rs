//! Router configuration.

use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::routing::{get, post};
use std::time::Duration;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Upper bound for a whole request, above the per-carrier timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the application router.
///
/// # Routes
///
/// - `POST /api/v1/shipping/quote` - Aggregate carrier quotes
/// - `POST /api/v1/reference/admin-divisions/refresh` - Reload reference table
/// - `GET /api/v1/health` - Health check
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/v1/shipping/quote", post(handlers::quote_shipping))
        .route(
            "/api/v1/reference/admin-divisions/refresh",
            post(handlers::refresh_admin_divisions),
        )
        .route("/api/v1/health", get(handlers::health_check));

    with_middleware(routes, REQUEST_TIMEOUT).with_state(state)
}

/// Wraps routes with CORS, the request deadline, panic recovery and tracing.
///
/// Deadline overruns and panics both render the `{success: false, error}`
/// envelope.
fn with_middleware<S>(routes: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handlers::middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::api::rest::handlers::{ErrorResponse, HealthResponse, RefreshResponse};
    use crate::application::services::{AggregationConfig, QuoteAggregator};
    use crate::domain::entities::RateRequestTemplate;
    use crate::domain::services::{DepartmentCodeMapper, FuzzyCityResolver, ResolverConfig};
    use crate::domain::value_objects::{CarrierId, ShipmentType};
    use crate::infrastructure::carriers::{
        CarrierResult, RateLine, RateProvider, RawCarrierResponse,
    };
    use crate::infrastructure::reference::{AdminDivisionCache, InMemoryAdminDivisionRepository};
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct FixedProvider {
        configured: bool,
    }

    #[async_trait]
    impl RateProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn quote(
            &self,
            carrier: &CarrierId,
            shipment_type: ShipmentType,
            _template: &RateRequestTemplate,
        ) -> CarrierResult<RawCarrierResponse> {
            Ok(RawCarrierResponse::new(
                carrier.clone(),
                shipment_type,
                vec![RateLine {
                    carrier: carrier.clone(),
                    service: "ground".to_string(),
                    service_description: None,
                    total_price: Decimal::new(10_000, 0),
                    currency: "COP".to_string(),
                    delivery_estimate: None,
                    estimated_days: Some(2),
                }],
            ))
        }
    }

    fn router(configured: bool) -> Router {
        let cache = AdminDivisionCache::new(Arc::new(InMemoryAdminDivisionRepository::with_seed()));
        let aggregator = QuoteAggregator::new(
            Arc::new(FixedProvider { configured }),
            Arc::new(cache),
            FuzzyCityResolver::new(ResolverConfig::default()),
            DepartmentCodeMapper::default(),
            AggregationConfig::default(),
        );
        create_router(AppState::new(Arc::new(aggregator)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn quote_success_envelope() {
        let response = router(true)
            .oneshot(post_json(
                "/api/v1/shipping/quote",
                json!({"destination_city": "Bogota", "destination_department": "Bogota DC"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["quotes"].as_array().unwrap().len(), 6);
        assert_eq!(body["domicilio"].as_array().unwrap().len(), 3);
        assert_eq!(body["oficina"].as_array().unwrap().len(), 3);
        assert_eq!(body["destination"]["dane_code"], "11001");
        assert_eq!(body["destination"]["state_code"], "DC");
        assert_eq!(body["matchInfo"]["matchType"], "exact");
        assert!(body.get("diagnostics").is_none());
    }

    #[tokio::test]
    async fn missing_city_is_bad_request() {
        let response = router(true)
            .oneshot(post_json(
                "/api/v1/shipping/quote",
                json!({"destination_department": "Antioquia"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = serde_json::from_value(read_json(response).await).unwrap();
        assert!(!body.success);
        assert!(body.error.contains("destination_city"));
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/shipping/quote")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router(true).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["success"], false);
    }

    #[tokio::test]
    async fn missing_credentials_is_server_error() {
        let response = router(false)
            .oneshot(post_json(
                "/api/v1/shipping/quote",
                json!({"destination_city": "Cali", "destination_department": "Valle del Cauca"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await["success"], false);
    }

    #[tokio::test]
    async fn refresh_then_health() {
        let app = router(true);

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/reference/admin-divisions/refresh", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let refreshed: RefreshResponse =
            serde_json::from_value(read_json(response).await).unwrap();
        assert!(refreshed.entries > 0);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_value(read_json(response).await).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.reference_entries, Some(refreshed.entries));
        assert!(health.carriers_configured);
    }

    #[tokio::test]
    async fn handler_panic_renders_failure_envelope() {
        async fn explode() -> &'static str {
            panic!("handler bug")
        }

        let app = with_middleware(Router::new().route("/explode", get(explode)), REQUEST_TIMEOUT);
        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = serde_json::from_value(read_json(response).await).unwrap();
        assert_eq!(body, ErrorResponse::new("internal server error"));
    }

    #[tokio::test]
    async fn request_deadline_renders_failure_envelope() {
        async fn stall() -> &'static str {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }

        let app = with_middleware(
            Router::new().route("/stall", get(stall)),
            Duration::from_millis(50),
        );
        let response = app
            .oneshot(Request::builder().uri("/stall").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body: ErrorResponse = serde_json::from_value(read_json(response).await).unwrap();
        assert!(!body.success);
        assert_eq!(body.error, "request timed out");
    }
}
