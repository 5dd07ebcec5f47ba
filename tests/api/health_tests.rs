//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::{body_json, TestApp};

/// Test basic health check endpoint returns 200 OK
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
}

/// Liveness never consults storage
#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new().await;

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "alive");
}

/// In-memory storage is always reachable
#[tokio::test]
async fn test_readiness_probe_reports_storage() {
    let app = TestApp::new().await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "healthy");
    assert!(json["checks"]["storage"]["latency_ms"].is_u64());
}

/// Served requests show up in the Prometheus output
#[tokio::test]
async fn test_metrics_exposes_request_counters() {
    let app = TestApp::new().await;
    app.delete("/api/applications/42/nominee").await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = crate::common::body_bytes(response).await;
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("nominee_service_http_requests_total"));
    assert!(text.contains("nominee_service_nominee_operations_total"));
}
