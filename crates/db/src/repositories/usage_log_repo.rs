//! Repository for the `api_usage_logs` table.

use sqlx::PgPool;
use strata_core::types::DbId;

use crate::models::usage_log::{CreateUsageLog, UsageLog, UsageSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, workspace_id, service, endpoint, status_code, response_time_ms, \
     error_message, created_at";

/// Provides operations for API usage logs.
pub struct UsageLogRepo;

impl UsageLogRepo {
    /// Record one external call.
    pub async fn create(pool: &PgPool, input: &CreateUsageLog) -> Result<UsageLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_usage_logs (workspace_id, service, endpoint, status_code,
                                         response_time_ms, error_message)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UsageLog>(&query)
            .bind(input.workspace_id)
            .bind(&input.service)
            .bind(&input.endpoint)
            .bind(input.status_code)
            .bind(input.response_time_ms)
            .bind(&input.error_message)
            .fetch_one(pool)
            .await
    }

    /// Aggregate a workspace's usage over the trailing `days` window.
    pub async fn summary(
        pool: &PgPool,
        workspace_id: DbId,
        days: i32,
    ) -> Result<UsageSummary, sqlx::Error> {
        sqlx::query_as::<_, UsageSummary>(
            "SELECT COUNT(*) AS total_requests, \
                    COUNT(*) FILTER (WHERE error_message IS NOT NULL) AS failed_requests, \
                    AVG(response_time_ms)::float8 AS avg_response_time_ms \
             FROM api_usage_logs \
             WHERE workspace_id = $1 AND created_at >= now() - make_interval(days => $2)",
        )
        .bind(workspace_id)
        .bind(days)
        .fetch_one(pool)
        .await
    }

    /// List a workspace's recent usage rows, most recent first.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
        limit: i64,
    ) -> Result<Vec<UsageLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM api_usage_logs \
             WHERE workspace_id = $1 ORDER BY created_at DESC LIMIT $2"
        );
        sqlx::query_as::<_, UsageLog>(&query)
            .bind(workspace_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
