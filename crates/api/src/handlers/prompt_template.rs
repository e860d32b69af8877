//! Handlers for the `/prompt-templates` resource.
//!
//! `prompt_content` is validated into the typed three-phase structure
//! at this boundary; a template that parses here cannot later fail
//! phase resolution with a missing key.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use strata_core::error::CoreError;
use strata_core::prompt::PromptContent;
use strata_core::types::DbId;
use strata_db::models::prompt_template::{
    CreatePromptTemplate, PromptTemplate, UpdatePromptTemplate,
};
use strata_db::repositories::PromptTemplateRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub workspace_id: DbId,
    /// When present, filter by active state; absent returns everything.
    pub active: Option<bool>,
}

/// GET /api/v1/prompt-templates?workspace_id=&active=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PromptTemplate>>> {
    let templates =
        PromptTemplateRepo::list_by_workspace(&state.pool, query.workspace_id, query.active)
            .await?;
    Ok(Json(templates))
}

/// POST /api/v1/prompt-templates
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePromptTemplate>,
) -> AppResult<(StatusCode, Json<PromptTemplate>)> {
    validate_content(&input.prompt_content)?;
    let template = PromptTemplateRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/v1/prompt-templates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PromptTemplate>> {
    let template = PromptTemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PromptTemplate",
            id,
        }))?;
    Ok(Json(template))
}

/// PUT /api/v1/prompt-templates/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePromptTemplate>,
) -> AppResult<Json<PromptTemplate>> {
    if let Some(content) = &input.prompt_content {
        validate_content(content)?;
    }
    let template = PromptTemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PromptTemplate",
            id,
        }))?;
    Ok(Json(template))
}

/// DELETE /api/v1/prompt-templates/{id} -- soft-deactivation.
///
/// System templates (`is_custom = false`) are immutable and cannot be
/// deleted.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let template = PromptTemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PromptTemplate",
            id,
        }))?;
    if !template.is_custom {
        return Err(AppError::BadRequest(
            "system templates cannot be deleted".into(),
        ));
    }
    PromptTemplateRepo::deactivate(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reject malformed `prompt_content` shapes outright.
fn validate_content(value: &serde_json::Value) -> AppResult<()> {
    let content = PromptContent::from_json(value)?;
    content.validate()?;
    Ok(())
}
