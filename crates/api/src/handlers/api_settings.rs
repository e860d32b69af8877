//! Handlers for the `/api-settings` resource.
//!
//! Secrets never leave the server: every response goes through
//! [`ApiSettings::masked`]. Clients that echo a masked value back on
//! upsert keep the stored secret instead of overwriting it with the
//! mask.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use strata_core::error::CoreError;
use strata_core::types::DbId;
use strata_db::models::api_settings::{MaskedApiSettings, UpsertApiSettings, SECRET_MASK};
use strata_db::repositories::ApiSettingsRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WorkspaceQuery {
    pub workspace_id: DbId,
}

/// GET /api/v1/api-settings?workspace_id=
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<WorkspaceQuery>,
) -> AppResult<Json<MaskedApiSettings>> {
    let settings = ApiSettingsRepo::find_by_workspace(&state.pool, query.workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ApiSettings",
            id: query.workspace_id,
        }))?;
    Ok(Json(settings.masked()))
}

/// PUT /api/v1/api-settings
pub async fn upsert(
    State(state): State<AppState>,
    Json(mut input): Json<UpsertApiSettings>,
) -> AppResult<Json<MaskedApiSettings>> {
    // A masked value means "keep what you have".
    if is_masked(&input.gemini_api_key) || is_masked(&input.notion_api_token) {
        let existing = ApiSettingsRepo::find_by_workspace(&state.pool, input.workspace_id).await?;
        if let Some(existing) = existing {
            if is_masked(&input.gemini_api_key) {
                input.gemini_api_key = existing.gemini_api_key;
            }
            if is_masked(&input.notion_api_token) {
                input.notion_api_token = existing.notion_api_token;
            }
        }
    }
    let settings = ApiSettingsRepo::upsert(&state.pool, &input).await?;
    Ok(Json(settings.masked()))
}

/// DELETE /api/v1/api-settings?workspace_id=
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<WorkspaceQuery>,
) -> AppResult<StatusCode> {
    let deleted = ApiSettingsRepo::delete(&state.pool, query.workspace_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ApiSettings",
            id: query.workspace_id,
        }))
    }
}

fn is_masked(value: &Option<String>) -> bool {
    value.as_deref() == Some(SECRET_MASK)
}
