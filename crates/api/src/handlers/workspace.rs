//! Handlers for the `/workspaces` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use strata_core::error::CoreError;
use strata_core::types::DbId;
use strata_db::models::workspace::{CreateWorkspace, Workspace};
use strata_db::repositories::WorkspaceRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/workspaces
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkspace>,
) -> AppResult<(StatusCode, Json<Workspace>)> {
    if input.slug.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "slug must not be empty".into(),
        )));
    }
    let workspace = WorkspaceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

/// GET /api/v1/workspaces/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Workspace>> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }))?;
    Ok(Json(workspace))
}
