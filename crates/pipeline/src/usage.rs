//! Best-effort recording of external API calls.
//!
//! The tracker is an explicitly constructed service handed to the
//! executor, never a process-global. A failed usage write is traced
//! and dropped; it must never affect the call it was recording.

use sqlx::PgPool;
use strata_core::types::DbId;
use strata_db::models::usage_log::CreateUsageLog;
use strata_db::repositories::UsageLogRepo;

/// Records one row per external call into `api_usage_logs`.
#[derive(Clone)]
pub struct UsageTracker {
    pool: PgPool,
}

impl UsageTracker {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record one call. Never fails.
    pub async fn record(
        &self,
        workspace_id: DbId,
        service: &str,
        endpoint: &str,
        response_time_ms: Option<i64>,
        error_message: Option<&str>,
    ) {
        let input = CreateUsageLog {
            workspace_id,
            service: service.to_string(),
            endpoint: endpoint.to_string(),
            status_code: None,
            response_time_ms,
            error_message: error_message.map(String::from),
        };
        if let Err(e) = UsageLogRepo::create(&self.pool, &input).await {
            tracing::warn!(workspace_id, service, endpoint, "usage log write failed: {e}");
        }
    }
}
