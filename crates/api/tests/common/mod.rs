use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use holocron_api::config::ServerConfig;
use holocron_api::router::build_app_router;
use holocron_api::state::AppState;
use holocron_store::models::character::{Character, UpdateCharacter};
use holocron_store::{CharacterService, CharacterStore, MemoryStore, ScanPage, StoreError};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app() -> Router {
    build_app_with_store(Arc::new(MemoryStore::new()))
}

/// Build the application router over the given store implementation.
///
/// Tests that span several requests pass clones of one shared store so
/// state persists across the apps they build.
pub fn build_app_with_store(store: Arc<dyn CharacterStore>) -> Router {
    let config = test_config();
    let state = AppState {
        service: CharacterService::new(store),
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

/// Send a PUT request with a JSON body.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Send a DELETE request to the app.
pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

/// Store double that fails every request with the same raw fault, for
/// exercising the storage error path end to end.
pub struct FailingStore;

impl FailingStore {
    fn fault() -> StoreError {
        StoreError::Request("connection reset by peer".to_string())
    }
}

#[async_trait]
impl CharacterStore for FailingStore {
    async fn put(&self, _character: &Character) -> Result<(), StoreError> {
        Err(Self::fault())
    }

    async fn get(&self, _id: &str) -> Result<Option<Character>, StoreError> {
        Err(Self::fault())
    }

    async fn scan(
        &self,
        _limit: i32,
        _start_after: Option<&str>,
    ) -> Result<ScanPage, StoreError> {
        Err(Self::fault())
    }

    async fn update(
        &self,
        _id: &str,
        _patch: &UpdateCharacter,
    ) -> Result<Character, StoreError> {
        Err(Self::fault())
    }

    async fn delete(&self, _id: &str) -> Result<Option<Character>, StoreError> {
        Err(Self::fault())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(Self::fault())
    }
}
