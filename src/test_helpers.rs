//! Test helper factories and mock state builders
//!
//! Provides a test configuration, an `AppState` / router over the in-memory
//! `MockAdminStore`, and request/response helpers for handler tests.

use crate::api::handlers::ServerState;
use crate::shopify::mock::MockAdminStore;
use crate::{AppState, Config};
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use std::sync::Arc;

// ============================================================================
// Mock state builders
// ============================================================================

/// Configuration pointing at a fake shop
pub fn test_config() -> Config {
    Config {
        server_port: 0,
        shop_domain: "demo.myshopify.com".to_string(),
        access_token: "shpat_test".to_string(),
        api_version: "2025-10".to_string(),
        request_timeout_secs: 30,
        endpoint_override: None,
        notes_namespace: "$app".to_string(),
        notes_key: "notes".to_string(),
        block_page_size: 2,
        action_extension: "Note-Added-Action".to_string(),
    }
}

/// Create a mock AppState whose store and catalog are both `store`
pub fn mock_app_state(store: Arc<MockAdminStore>) -> AppState {
    AppState::with_backend(test_config(), store.clone(), store)
}

/// Full API router over `store`
pub fn mock_server(store: Arc<MockAdminStore>) -> Router {
    crate::api::create_router(Arc::new(ServerState::new(mock_app_state(store))))
}

// ============================================================================
// Request helpers
// ============================================================================

/// Build a request, with a JSON body when `body` is given
pub fn json_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON
pub async fn response_json(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
