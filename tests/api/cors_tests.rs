//! CORS API Tests

use axum::http::{header, StatusCode};

use crate::common::{nominee_uri, TestApp, ALLOWED_ORIGIN, KNOWN_APPLICATION};

#[tokio::test]
async fn test_preflight_from_allowed_origin() {
    let app = TestApp::new().await;

    let response = app
        .preflight(&nominee_uri(KNOWN_APPLICATION), ALLOWED_ORIGIN, "POST")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOWED_ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn test_preflight_from_foreign_origin_is_not_allowed() {
    let app = TestApp::new().await;

    let response = app
        .preflight(
            &nominee_uri(KNOWN_APPLICATION),
            "http://attacker.example",
            "DELETE",
        )
        .await;

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
