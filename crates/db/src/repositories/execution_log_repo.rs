//! Repository for the `execution_logs` table.
//!
//! Log rows follow a one-way lifecycle: created `pending`, marked
//! `running` at dispatch, then exactly one terminal transition
//! (`completed`, `failed`, or `skipped`). The terminal updates guard on
//! the current status so a finished row is never rewritten.

use sqlx::PgPool;
use strata_core::types::DbId;

use crate::models::execution_log::{
    ExecutionLog, EXECUTION_COMPLETED, EXECUTION_FAILED, EXECUTION_RUNNING,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, prompt_template_id, phase, status, output_content, \
     error_message, notion_page_id, execution_time_ms, started_at, completed_at, created_at";

/// Provides lifecycle operations for execution logs.
pub struct ExecutionLogRepo;

impl ExecutionLogRepo {
    /// Create a new log row in `pending` status.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        prompt_template_id: DbId,
        phase: i32,
    ) -> Result<ExecutionLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO execution_logs (project_id, prompt_template_id, phase)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExecutionLog>(&query)
            .bind(project_id)
            .bind(prompt_template_id)
            .bind(phase)
            .fetch_one(pool)
            .await
    }

    /// Transition a log to `running` and stamp `started_at`.
    pub async fn mark_running(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE execution_logs SET status = $2, started_at = now() \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(EXECUTION_RUNNING)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Terminal transition to `completed` with output, timing, and the
    /// optional archival page reference.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        output_content: &str,
        execution_time_ms: i64,
        notion_page_id: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE execution_logs SET \
                status = $2, \
                output_content = $3, \
                execution_time_ms = $4, \
                notion_page_id = $5, \
                completed_at = now() \
             WHERE id = $1 AND status = 'running'",
        )
        .bind(id)
        .bind(EXECUTION_COMPLETED)
        .bind(output_content)
        .bind(execution_time_ms)
        .bind(notion_page_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Terminal transition to `failed` with an error message.
    pub async fn fail(pool: &PgPool, id: DbId, error_message: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE execution_logs SET \
                status = $2, \
                error_message = $3, \
                completed_at = now() \
             WHERE id = $1 AND status IN ('pending', 'running')",
        )
        .bind(id)
        .bind(EXECUTION_FAILED)
        .bind(error_message)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a log by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ExecutionLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM execution_logs WHERE id = $1");
        sqlx::query_as::<_, ExecutionLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's logs, most recent first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ExecutionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM execution_logs WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ExecutionLog>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
