//! Execution log entity model.
//!
//! One row per (project, template, phase) attempt. Lifecycle:
//! `pending -> running -> {completed | failed}`; `skipped` is part of
//! the status vocabulary but the orchestrator does not synthesize rows
//! for phases it abandons. Rows are immutable once terminal. They are
//! the durable audit trail of every attempt.

use serde::Serialize;
use sqlx::FromRow;
use strata_core::types::{DbId, Timestamp};

pub const EXECUTION_PENDING: &str = "pending";
pub const EXECUTION_RUNNING: &str = "running";
pub const EXECUTION_COMPLETED: &str = "completed";
pub const EXECUTION_FAILED: &str = "failed";
pub const EXECUTION_SKIPPED: &str = "skipped";

/// An `execution_logs` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExecutionLog {
    pub id: DbId,
    pub project_id: DbId,
    /// Nullable: the template may be removed after the run.
    pub prompt_template_id: Option<DbId>,
    pub phase: i32,
    pub status: String,
    pub output_content: Option<String>,
    pub error_message: Option<String>,
    pub notion_page_id: Option<String>,
    pub execution_time_ms: Option<i64>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
