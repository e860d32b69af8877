//! Handlers for Notion workspace utilities.
//!
//! Both endpoints use the token stored in the workspace's settings;
//! tokens are never accepted from the request body.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use strata_core::error::CoreError;
use strata_core::types::DbId;
use strata_db::repositories::ApiSettingsRepo;
use strata_notion::{NotionApiError, NotionClient};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_DATABASE_TITLE: &str = "Strategy Reports";

#[derive(Debug, Deserialize)]
pub struct TestConnectionRequest {
    pub workspace_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct TestConnectionResponse {
    pub message: String,
    pub user_name: Option<String>,
    pub latency_ms: u64,
    pub can_create_databases: bool,
}

/// POST /api/v1/notion/test-connection
pub async fn test_connection(
    State(state): State<AppState>,
    Json(input): Json<TestConnectionRequest>,
) -> AppResult<Json<TestConnectionResponse>> {
    let token = load_token(&state, input.workspace_id).await?;
    let info = NotionClient::new(token)
        .test_connection()
        .await
        .map_err(map_notion_error)?;

    Ok(Json(TestConnectionResponse {
        message: format!("Token valid, round trip {}ms", info.latency_ms),
        user_name: info.user_name,
        latency_ms: info.latency_ms,
        can_create_databases: info.can_create_databases,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateDatabaseRequest {
    pub workspace_id: DbId,
    /// Parent page for the new database; defaults to the first page the
    /// integration can see.
    pub parent_page_id: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateDatabaseResponse {
    pub database_id: String,
    pub url: Option<String>,
}

/// POST /api/v1/notion/create-database
pub async fn create_database(
    State(state): State<AppState>,
    Json(input): Json<CreateDatabaseRequest>,
) -> AppResult<Json<CreateDatabaseResponse>> {
    let token = load_token(&state, input.workspace_id).await?;
    let title = input.title.as_deref().unwrap_or(DEFAULT_DATABASE_TITLE);

    let database = NotionClient::new(token)
        .create_database(input.parent_page_id.as_deref(), title)
        .await
        .map_err(map_notion_error)?;

    Ok(Json(CreateDatabaseResponse {
        database_id: database.id,
        url: database.url,
    }))
}

/// Look up the workspace's stored archival token.
async fn load_token(state: &AppState, workspace_id: DbId) -> AppResult<String> {
    let settings = ApiSettingsRepo::find_by_workspace(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ApiSettings",
            id: workspace_id,
        }))?;
    settings.notion_api_token.ok_or_else(|| {
        AppError::Core(CoreError::Configuration(
            "Notion API token is not set for this workspace".into(),
        ))
    })
}

fn map_notion_error(err: NotionApiError) -> AppError {
    match err {
        NotionApiError::NoParentPage => AppError::BadRequest(err.to_string()),
        other => AppError::Upstream(other.to_string()),
    }
}
