pub mod api_settings;
pub mod execute;
pub mod execution_log;
pub mod health;
pub mod notion;
pub mod project;
pub mod prompt_template;
pub mod usage;
pub mod workspace;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workspaces                      create (POST)
/// /workspaces/{id}                 get
///
/// /projects                        list (?workspace_id), create
/// /projects/{id}                   get, update, delete (= archive)
///
/// /prompt-templates                list (?workspace_id, ?active), create
/// /prompt-templates/{id}           get, update, delete (= deactivate)
///
/// /api-settings                    get (?workspace_id), upsert (PUT),
///                                  delete (?workspace_id); secrets masked
///
/// /execute                         run one (project, template, phase) step
/// /execute/batch                   run a batch across selected templates
///
/// /execution-logs                  list (?project_id), the audit trail
///
/// /usage                           usage summary (?workspace_id, ?days)
///
/// /notion/test-connection          verify the configured token (POST)
/// /notion/create-database          bootstrap a report database (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workspaces", workspace::router())
        .nest("/projects", project::router())
        .nest("/prompt-templates", prompt_template::router())
        .nest("/api-settings", api_settings::router())
        .nest("/execute", execute::router())
        .nest("/execution-logs", execution_log::router())
        .nest("/usage", usage::router())
        .nest("/notion", notion::router())
}
