//! Handlers for API usage reporting.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use strata_core::types::DbId;
use strata_db::models::usage_log::{UsageLog, UsageSummary};
use strata_db::repositories::UsageLogRepo;

use crate::error::AppResult;
use crate::state::AppState;

const DEFAULT_WINDOW_DAYS: i32 = 30;
const RECENT_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    pub workspace_id: DbId,
    /// Trailing window in days (default 30).
    pub days: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub summary: UsageSummary,
    pub recent: Vec<UsageLog>,
}

/// GET /api/v1/usage?workspace_id=&days=
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<UsageQuery>,
) -> AppResult<Json<UsageResponse>> {
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    let summary = UsageLogRepo::summary(&state.pool, query.workspace_id, days).await?;
    let recent =
        UsageLogRepo::list_by_workspace(&state.pool, query.workspace_id, RECENT_LIMIT).await?;
    Ok(Json(UsageResponse { summary, recent }))
}
