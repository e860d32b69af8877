//! Route definitions for the `/prompt-templates` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::prompt_template;
use crate::state::AppState;

/// Routes mounted at `/prompt-templates`.
///
/// ```text
/// GET    /        -> list (?workspace_id, ?active)
/// POST   /        -> create (typed prompt_content validated here)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete (deactivates; rejected for system templates)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(prompt_template::list).post(prompt_template::create),
        )
        .route(
            "/{id}",
            get(prompt_template::get_by_id)
                .put(prompt_template::update)
                .delete(prompt_template::delete),
        )
}
