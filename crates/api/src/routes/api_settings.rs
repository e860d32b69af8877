//! Route definitions for the `/api-settings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::api_settings;
use crate::state::AppState;

/// Routes mounted at `/api-settings`. One settings row per workspace;
/// every response masks the stored secrets.
///
/// ```text
/// GET    /    -> get (?workspace_id)
/// PUT    /    -> upsert
/// DELETE /    -> delete (?workspace_id)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(api_settings::get)
            .put(api_settings::upsert)
            .delete(api_settings::delete),
    )
}
