//! Route definitions for Notion workspace utilities.

use axum::routing::post;
use axum::Router;

use crate::handlers::notion;
use crate::state::AppState;

/// Routes mounted at `/notion`.
///
/// ```text
/// POST   /test-connection    -> verify the workspace's stored token
/// POST   /create-database    -> bootstrap a report database
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/test-connection", post(notion::test_connection))
        .route("/create-database", post(notion::create_database))
}
