//! End-to-end quote flow against a mocked rating API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use shipping_quote::api::rest::{AppState, create_router};
use shipping_quote::config::AppConfig;
use shipping_quote::infrastructure::carriers::CarrierApiConfig;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rate_body(carrier: &str, lines: &[(&str, u64)]) -> Value {
    json!({
        "meta": "rate",
        "data": lines
            .iter()
            .map(|(service, price)| json!({
                "carrier": carrier,
                "service": service,
                "totalPrice": price,
                "currency": "COP",
                "deliveryEstimate": "2-4 días",
                "deliveryDate": {"dateDifference": 3}
            }))
            .collect::<Vec<_>>()
    })
}

async fn mount_carrier(server: &MockServer, carrier: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/ship/rate/"))
        .and(header_matcher("authorization", "Bearer integration-key"))
        .and(body_partial_json(json!({"shipment": {"carrier": carrier}})))
        .respond_with(response)
        .expect(2)
        .mount(server)
        .await;
}

fn app(server: &MockServer, per_call_timeout_ms: u64) -> axum::Router {
    let mut config = AppConfig::default();
    config.carrier_api = CarrierApiConfig::new(server.uri())
        .with_api_key("integration-key")
        .with_timeout(5_000);
    config.aggregation.per_call_timeout_ms = per_call_timeout_ms;

    let aggregator = config.build_aggregator().unwrap();
    create_router(AppState::new(Arc::new(aggregator)))
}

async fn post_quote(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/shipping/quote")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn slow_carrier_is_dropped_and_others_are_ranked() {
    let server = MockServer::start().await;
    mount_carrier(
        &server,
        "coordinadora",
        ResponseTemplate::new(200).set_body_json(rate_body(
            "coordinadora",
            &[("ground", 14_500), ("express", 9_000)],
        )),
    )
    .await;
    mount_carrier(
        &server,
        "servientrega",
        ResponseTemplate::new(200)
            .set_body_json(rate_body("servientrega", &[("ground", 1_000)]))
            .set_delay(Duration::from_secs(2)),
    )
    .await;
    mount_carrier(
        &server,
        "interrapidisimo",
        ResponseTemplate::new(200).set_body_json(rate_body(
            "interrapidisimo",
            &[("mercancia", 12_000), ("mercancia", 13_000)],
        )),
    )
    .await;

    let (status, body) = post_quote(
        app(&server, 300),
        json!({
            "destination_city": "Medelin",
            "destination_department": "ANT",
            "package_weight": 2.5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let quotes = body["quotes"].as_array().unwrap();
    assert_eq!(quotes.len(), 4);
    assert!(quotes.iter().all(|q| q["carrier"] != "servientrega"));
    assert!(quotes.iter().all(|q| q["service"] != "express"));
    assert_eq!(quotes[0]["carrier"], "interrapidisimo");
    assert_eq!(quotes[0]["price"], 12_000.0);
    assert_eq!(quotes[0]["serviceDisplayName"], "Mercancía Terrestre");
    assert_eq!(quotes[0]["estimatedDays"], 3);

    let prices: Vec<f64> = quotes.iter().map(|q| q["price"].as_f64().unwrap()).collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));

    assert_eq!(body["domicilio"].as_array().unwrap().len(), 2);
    assert_eq!(body["oficina"].as_array().unwrap().len(), 2);
    assert_eq!(body["oficina"][0]["deliveryTypeLabel"], "Oficina");

    assert_eq!(body["destination"]["city"], "Medellín");
    assert_eq!(body["destination"]["department"], "Antioquia");
    assert_eq!(body["destination"]["state_code"], "AN");
    assert_eq!(body["destination"]["dane_code"], "05001");
    assert_eq!(body["matchInfo"]["matchType"], "fuzzy");
    assert_eq!(body["matchInfo"]["matchedMunicipality"], "Medellín");
}

#[tokio::test]
async fn carrier_errors_yield_empty_success() {
    let server = MockServer::start().await;
    for carrier in ["coordinadora", "servientrega", "interrapidisimo"] {
        mount_carrier(
            &server,
            carrier,
            ResponseTemplate::new(400).set_body_json(json!({
                "meta": "error",
                "error": {"code": 1105, "message": "Destination not covered"}
            })),
        )
        .await;
    }

    let (status, body) = post_quote(
        app(&server, 1_000),
        json!({"destination_city": "Xyzabc123", "destination_department": "Nowhere"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["quotes"].as_array().unwrap().is_empty());
    assert_eq!(body["matchInfo"]["matchType"], "not_found");
    assert_eq!(body["destination"]["dane_code"], "11001");
    assert_eq!(body["destination"]["state_code"], "DC");
}
