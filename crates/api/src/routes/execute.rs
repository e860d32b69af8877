//! Route definitions for step and batch execution.

use axum::routing::post;
use axum::Router;

use crate::handlers::execute;
use crate::state::AppState;

/// Routes mounted at `/execute`.
///
/// ```text
/// POST   /         -> run one (project, template, phase) step
/// POST   /batch    -> run all selected templates, three phases each
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(execute::execute_step))
        .route("/batch", post(execute::execute_batch))
}
