//! API usage log model and aggregate views.

use serde::Serialize;
use sqlx::FromRow;
use strata_core::types::{DbId, Timestamp};

/// External service names recorded in usage logs.
pub const SERVICE_GEMINI: &str = "gemini";
pub const SERVICE_NOTION: &str = "notion";

/// An `api_usage_logs` row: one external call made on behalf of a workspace.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsageLog {
    pub id: DbId,
    pub workspace_id: DbId,
    pub service: String,
    pub endpoint: String,
    pub status_code: Option<i32>,
    pub response_time_ms: Option<i64>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording one external call.
#[derive(Debug, Clone)]
pub struct CreateUsageLog {
    pub workspace_id: DbId,
    pub service: String,
    pub endpoint: String,
    pub status_code: Option<i32>,
    pub response_time_ms: Option<i64>,
    pub error_message: Option<String>,
}

/// Aggregate usage over a window, returned by the usage endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsageSummary {
    pub total_requests: i64,
    pub failed_requests: i64,
    pub avg_response_time_ms: Option<f64>,
}
