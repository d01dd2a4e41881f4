mod common;

use axum::{body::Body, Router};
use http::{header, Request, StatusCode};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use warehouse_api::{app_router, config::AppConfig, services::AppServices, AppState};

async fn test_app() -> (Router, AppServices) {
    let db = common::setup_db().await;
    let state = AppState::new(db, AppConfig::default());
    let services = state.services.clone();
    (app_router(state), services)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = test_app().await;
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_resource_returns_envelope_and_duplicate_conflicts() {
    let (app, _) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/resources",
            json!({ "name": "Steel" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["data"]["name"], "Steel");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/resources",
            json!({ "name": "Steel" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 409);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn list_endpoints_return_bare_arrays() {
    let (app, services) = test_app().await;
    services.units.create("kg").await.unwrap();
    services.units.create("pcs").await.unwrap();

    let response = app
        .clone()
        .oneshot(get_request("/api/units"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app
        .oneshot(get_request("/api/storage/balance"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn archived_filter_is_honored() {
    let (app, services) = test_app().await;
    let steel = services.resources.create("Steel").await.unwrap();
    services.resources.create("Copper").await.unwrap();
    services.resources.archive(steel.id).await.unwrap();

    let response = app
        .oneshot(get_request("/api/resources?state=archived"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Steel");
}

#[tokio::test]
async fn receipt_delete_returns_no_content() {
    let (app, services) = test_app().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    let doc = services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(5))])
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/receipts/{}", doc.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn sign_and_withdraw_round_trip_over_http() {
    let (app, services) = test_app().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    let acme = services.clients.create("Acme", "Main st 1").await.unwrap();
    services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(5))])
        .await
        .unwrap();
    let doc = services
        .shipments
        .create(acme.id, &[common::line(steel.id, kg.id, dec!(3))])
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/shipments/sign/{}", doc.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["state"], "signed");

    // Signing twice is a 400 with the envelope.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/shipments/sign/{}", doc.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/shipments/withdraw/{}", doc.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["state"], "not_signed");
}

#[tokio::test]
async fn malformed_id_filter_is_a_bad_request() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(get_request("/api/receipts?numbers=1,x"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_document_maps_to_404_envelope() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/receipts/999",
            json!({ "lines": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 404);
}
