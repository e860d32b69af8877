//! Handlers for step and batch execution.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use strata_core::types::DbId;
use strata_pipeline::ExecutionSettings;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub project_id: DbId,
    pub prompt_template_id: DbId,
    /// Execution phase, 1..=3.
    pub phase: i32,
    /// Output of the previous phase, spliced into phase 2/3 prompts.
    pub previous_output: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub output: String,
    pub execution_time_ms: i64,
    pub notion_page_id: Option<String>,
    pub log_id: DbId,
}

/// POST /api/v1/execute -- run one (project, template, phase) step.
pub async fn execute_step(
    State(state): State<AppState>,
    Json(input): Json<ExecuteRequest>,
) -> AppResult<Json<ExecuteResponse>> {
    let result = state
        .executor
        .execute_step(
            input.project_id,
            input.prompt_template_id,
            input.phase,
            input.previous_output.as_deref(),
            true,
        )
        .await?;

    Ok(Json(ExecuteResponse {
        success: true,
        output: result.output,
        execution_time_ms: result.execution_time_ms,
        notion_page_id: result.notion_page_id,
        log_id: result.log_id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub project_id: DbId,
    /// Selection filter; the stored `order_index` governs execution
    /// order.
    pub prompt_template_ids: Vec<DbId>,
    pub execution_settings: ExecutionSettings,
}

/// POST /api/v1/execute/batch -- run every selected template through
/// its three phases.
///
/// A stop-on-error abort answers 500 with `{success: false, error,
/// results}` carrying the partial trail; anything else answers 200 with
/// the full aggregate.
pub async fn execute_batch(
    State(state): State<AppState>,
    Json(input): Json<BatchRequest>,
) -> AppResult<Response> {
    let outcome = state
        .batch_runner
        .run_batch(
            input.project_id,
            &input.prompt_template_ids,
            &input.execution_settings,
        )
        .await?;

    if let Some(error) = &outcome.aborted {
        let body = json!({
            "success": false,
            "error": error,
            "results": outcome.results,
        });
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response());
    }

    let body = json!({
        "success": true,
        "message": format!(
            "Batch finished: {}/{} steps succeeded",
            outcome.successful_executions, outcome.total_executions
        ),
        "results": outcome.results,
        "total_executions": outcome.total_executions,
        "successful_executions": outcome.successful_executions,
        "failed_executions": outcome.failed_executions,
    });
    Ok(Json(body).into_response())
}
