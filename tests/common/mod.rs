//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use nominee_service::application::services::NomineeServiceImpl;
use nominee_service::config::CorsSettings;
use nominee_service::infrastructure::repositories::InMemoryNomineeRepository;
use nominee_service::startup::{build_router, AppState};

/// Loan application seeded into every test store
pub const KNOWN_APPLICATION: i64 = 42;

/// Second seeded loan application, for cross-scope checks
pub const OTHER_APPLICATION: i64 = 43;

/// Origin accepted by the test CORS configuration
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryNomineeRepository>,
}

impl TestApp {
    /// Create a test application backed by in-memory storage
    pub async fn new() -> Self {
        let repo = Arc::new(InMemoryNomineeRepository::with_applications([
            KNOWN_APPLICATION,
            OTHER_APPLICATION,
        ]));

        let state = AppState {
            nominee_service: Arc::new(NomineeServiceImpl::new(repo.clone())),
            storage: repo.clone(),
        };
        let cors = CorsSettings {
            allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
        };

        Self {
            router: build_router(state, &cors),
            repo,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        self.send(json_request("POST", uri, body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, uri: &str, body: &str) -> Response {
        self.send(json_request("PUT", uri, body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a CORS preflight request
    pub async fn preflight(&self, uri: &str, origin: &str, method: &str) -> Response {
        self.send(
            Request::builder()
                .method("OPTIONS")
                .uri(uri)
                .header("Origin", origin)
                .header("Access-Control-Request-Method", method)
                .header("Access-Control-Request-Headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Path of the nominee resource for an application
pub fn nominee_uri(application_id: i64) -> String {
    format!("/api/applications/{}/nominee", application_id)
}

/// Read a response body as bytes
pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Read a response body as JSON
pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
