//! Route definitions for the execution-log audit trail.

use axum::routing::get;
use axum::Router;

use crate::handlers::execution_log;
use crate::state::AppState;

/// Routes mounted at `/execution-logs`.
///
/// ```text
/// GET    /    -> list (?project_id), most recent first
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(execution_log::list))
}
