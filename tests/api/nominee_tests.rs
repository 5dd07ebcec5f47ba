//! Nominee API Tests

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{
    body_bytes, body_json, nominee_uri, TestApp, KNOWN_APPLICATION, OTHER_APPLICATION,
};

fn jane_doe() -> Value {
    json!({
        "nomineeName": "Jane Doe",
        "relationship": "Spouse",
        "nomineeDob": "1990-01-01",
        "nomineeAddress": "12 Lake Road",
        "nomineePhone": "9876543210",
        "nomineeEmail": "jane@example.com",
        "nomineeAadhaar": "123412341234",
        "nomineePan": "ABCDE1234F"
    })
}

/// Create then read back the nominee of an application
#[tokio::test]
async fn test_upsert_then_get_returns_record() {
    let app = TestApp::new().await;
    let uri = nominee_uri(KNOWN_APPLICATION);

    let response = app.post_json(&uri, &jane_doe().to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await;
    assert_eq!(saved["id"], json!(KNOWN_APPLICATION));
    assert_eq!(saved["applicationId"], json!(KNOWN_APPLICATION));

    let response = app.get(&uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;

    assert_eq!(fetched["nomineeName"], "Jane Doe");
    assert_eq!(fetched["relationship"], "Spouse");
    assert_eq!(fetched["nomineeDob"], "1990-01-01");
    assert_eq!(fetched["nomineePan"], "ABCDE1234F");
    assert_eq!(fetched["createdAt"], saved["createdAt"]);
}

/// Every field is echoed and a later read returns the same body
#[tokio::test]
async fn test_saved_body_matches_later_read() {
    let app = TestApp::new().await;
    let uri = nominee_uri(KNOWN_APPLICATION);
    let payload = json!({
        "nomineeName": "Jane Doe",
        "relationship": "Spouse",
        "nomineeDob": "1990-01-01",
        "nomineeAddress": "1 Main St",
        "nomineePhone": "555-1234",
        "nomineeEmail": "jane@example.com",
        "nomineeAadhaar": "123456789012",
        "nomineePan": "ABCDE1234F"
    });

    let response = app.post_json(&uri, &payload.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await;

    for (field, value) in payload.as_object().unwrap() {
        assert_eq!(&saved[field], value, "{} not echoed", field);
    }
    assert_eq!(saved["id"], json!(KNOWN_APPLICATION));

    let response = app.get(&uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, saved);
}

/// Unknown nominee reads as 404 with no body
#[tokio::test]
async fn test_get_missing_nominee_is_empty_404() {
    let app = TestApp::new().await;

    let response = app.get(&nominee_uri(999)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = TestApp::new().await;
    let uri = nominee_uri(KNOWN_APPLICATION);

    app.post_json(&uri, &jane_doe().to_string()).await;

    let response = app.delete(&uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get(&uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.repo.nominee_count().await, 0);
}

#[tokio::test]
async fn test_delete_without_nominee_is_no_op() {
    let app = TestApp::new().await;

    let response = app.delete(&nominee_uri(KNOWN_APPLICATION)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .delete(&format!("{}/{}", nominee_uri(KNOWN_APPLICATION), 12345))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// Absent and null fields come back as explicit nulls
#[tokio::test]
async fn test_round_trip_preserves_nulls() {
    let app = TestApp::new().await;
    let uri = nominee_uri(KNOWN_APPLICATION);

    let body = json!({ "nomineeName": "Jane Doe", "nomineePhone": null });
    app.post_json(&uri, &body.to_string()).await;

    let fetched = body_json(app.get(&uri).await).await;
    assert_eq!(fetched["nomineeName"], "Jane Doe");
    for field in [
        "relationship",
        "nomineeDob",
        "nomineeAddress",
        "nomineePhone",
        "nomineeEmail",
        "nomineeAadhaar",
        "nomineePan",
    ] {
        assert_eq!(fetched[field], Value::Null, "{} should be null", field);
    }
}

/// A second upsert replaces the first and keeps one record
#[tokio::test]
async fn test_upsert_twice_overwrites() {
    let app = TestApp::new().await;
    let uri = nominee_uri(KNOWN_APPLICATION);

    app.post_json(&uri, &jane_doe().to_string()).await;
    let response = app
        .post_json(&uri, &json!({ "nomineeName": "John Roe" }).to_string())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(app.get(&uri).await).await;
    assert_eq!(fetched["nomineeName"], "John Roe");
    assert_eq!(fetched["relationship"], Value::Null);
    assert_eq!(app.repo.nominee_count().await, 1);

    let list = body_json(
        app.get(&format!("/api/applications/{}/nominees", KNOWN_APPLICATION))
            .await,
    )
    .await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_upsert_for_unknown_application_is_404() {
    let app = TestApp::new().await;

    let response = app
        .post_json(&nominee_uri(999), &jane_doe().to_string())
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.repo.nominee_count().await, 0);
}

#[tokio::test]
async fn test_malformed_json_is_400_and_stores_nothing() {
    let app = TestApp::new().await;

    let response = app
        .post_json(&nominee_uri(KNOWN_APPLICATION), r#"{"nomineeName": "#)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_json(
            &nominee_uri(KNOWN_APPLICATION),
            &json!({ "nomineeDob": "not-a-date" }).to_string(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.repo.nominee_count().await, 0);
}

/// Free-form values are stored exactly as sent
#[tokio::test]
async fn test_free_form_values_round_trip() {
    let app = TestApp::new().await;
    let uri = nominee_uri(KNOWN_APPLICATION);

    let body = json!({
        "nomineePhone": "+91 (022) 1234-5678 x9",
        "nomineeEmail": "jane",
        "nomineeAadhaar": "1234 5678 9012 3456",
        "nomineePan": "not-a-pan-number"
    });
    let response = app.post_json(&uri, &body.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(app.get(&uri).await).await;
    assert_eq!(fetched["nomineePhone"], "+91 (022) 1234-5678 x9");
    assert_eq!(fetched["nomineeEmail"], "jane");
    assert_eq!(fetched["nomineeAadhaar"], "1234 5678 9012 3456");
    assert_eq!(fetched["nomineePan"], "not-a-pan-number");
}

/// A nominee is invisible from another application's scope
#[tokio::test]
async fn test_cross_application_access_is_404() {
    let app = TestApp::new().await;
    app.post_json(&nominee_uri(KNOWN_APPLICATION), &jane_doe().to_string())
        .await;

    let foreign = format!("{}/{}", nominee_uri(OTHER_APPLICATION), KNOWN_APPLICATION);

    let response = app.get(&foreign).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .put_json(&foreign, &json!({ "nomineeName": "Mallory" }).to_string())
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.delete(&foreign).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = body_json(app.get(&nominee_uri(KNOWN_APPLICATION)).await).await;
    assert_eq!(fetched["nomineeName"], "Jane Doe");
}

#[tokio::test]
async fn test_create_twice_conflicts() {
    let server = TestServer::new(TestApp::new().await.router).unwrap();
    let uri = format!("/api/applications/{}/nominees", KNOWN_APPLICATION);

    let response = server.post(&uri).json(&jane_doe()).await;
    response.assert_status_ok();

    let response = server.post(&uri).json(&jane_doe()).await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_and_update_by_id() {
    let server = TestServer::new(TestApp::new().await.router).unwrap();
    let by_id = format!("{}/{}", nominee_uri(KNOWN_APPLICATION), KNOWN_APPLICATION);

    server
        .post(&nominee_uri(KNOWN_APPLICATION))
        .json(&jane_doe())
        .await
        .assert_status_ok();

    let response = server
        .put(&by_id)
        .json(&json!({ "nomineeName": "Jane Smith", "relationship": "Spouse" }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["nomineeName"], "Jane Smith");
    assert_eq!(updated["nomineeEmail"], Value::Null);

    let fetched: Value = server.get(&by_id).await.json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_missing_nominee_is_404() {
    let server = TestServer::new(TestApp::new().await.router).unwrap();

    let response = server
        .put(&format!("{}/{}", nominee_uri(KNOWN_APPLICATION), KNOWN_APPLICATION))
        .json(&jane_doe())
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_list_is_empty_without_nominee() {
    let server = TestServer::new(TestApp::new().await.router).unwrap();

    let list: Value = server
        .get(&format!("/api/applications/{}/nominees", KNOWN_APPLICATION))
        .await
        .json();
    assert_eq!(list, json!([]));
}
