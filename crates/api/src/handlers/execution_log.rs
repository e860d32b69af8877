//! Handlers for the execution-log audit trail.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use strata_core::types::DbId;
use strata_db::models::execution_log::ExecutionLog;
use strata_db::repositories::ExecutionLogRepo;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub project_id: DbId,
}

/// GET /api/v1/execution-logs?project_id=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ExecutionLog>>> {
    let logs = ExecutionLogRepo::list_by_project(&state.pool, query.project_id).await?;
    Ok(Json(logs))
}
