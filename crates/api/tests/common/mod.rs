use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use strata_api::config::ServerConfig;
use strata_api::router::build_app_router;
use strata_api::state::AppState;
use strata_pipeline::{
    ArchiveError, DocumentArchiver, GenerateError, TextGenerator,
};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Generator stub: echoes a canned response, or fails every call.
pub struct StubGenerator {
    pub fail: bool,
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _api_key: &str, _prompt: &str) -> Result<String, GenerateError> {
        if self.fail {
            Err(GenerateError("stub upstream outage".into()))
        } else {
            Ok("stub generated report".into())
        }
    }
}

/// Archiver stub: always succeeds with a fixed page id.
pub struct StubArchiver;

#[async_trait]
impl DocumentArchiver for StubArchiver {
    async fn archive(
        &self,
        _token: &str,
        _database_id: &str,
        _title: &str,
        _content: &str,
    ) -> Result<String, ArchiveError> {
        Ok("page-stub".into())
    }
}

/// Build the full application router with all middleware layers and a
/// working generator stub.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(StubGenerator { fail: false }))
}

/// Same, with a caller-supplied generator (e.g. a failing stub).
pub fn build_test_app_with(pool: PgPool, generator: Arc<dyn TextGenerator>) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone(), generator, Arc::new(StubArchiver));
    build_app_router(state, &config)
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON request with the given method and body.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a DELETE request to the app.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST a JSON body and assert the expected status, returning the
/// response JSON.
pub async fn post_expect(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    status: StatusCode,
) -> serde_json::Value {
    let response = send_json(app.clone(), "POST", uri, body).await;
    assert_eq!(response.status(), status);
    body_json(response).await
}
