//! Route definitions for API usage reporting.

use axum::routing::get;
use axum::Router;

use crate::handlers::usage;
use crate::state::AppState;

/// Routes mounted at `/usage`.
///
/// ```text
/// GET    /    -> summary + recent calls (?workspace_id, ?days)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(usage::get))
}
