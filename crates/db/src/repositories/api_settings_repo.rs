//! Repository for the `api_settings` table.

use sqlx::PgPool;
use strata_core::types::DbId;

use crate::models::api_settings::{ApiSettings, UpsertApiSettings};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, workspace_id, gemini_api_key, notion_api_token, notion_database_id, \
     api_rate_limit, execution_delay, created_at, updated_at";

/// Provides operations for per-workspace API settings.
pub struct ApiSettingsRepo;

impl ApiSettingsRepo {
    /// Find the settings row for a workspace.
    pub async fn find_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Option<ApiSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM api_settings WHERE workspace_id = $1");
        sqlx::query_as::<_, ApiSettings>(&query)
            .bind(workspace_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or update a workspace's settings in one statement.
    ///
    /// Omitted tunables keep their column defaults on insert and their
    /// current values on update; omitted secrets are cleared (the caller
    /// sends the full desired state, as the settings form does).
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertApiSettings,
    ) -> Result<ApiSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_settings (workspace_id, gemini_api_key, notion_api_token,
                                       notion_database_id, api_rate_limit, execution_delay)
             VALUES ($1, $2, $3, $4, COALESCE($5, 60), COALESCE($6, 30))
             ON CONFLICT (workspace_id) DO UPDATE SET
                gemini_api_key = EXCLUDED.gemini_api_key,
                notion_api_token = EXCLUDED.notion_api_token,
                notion_database_id = EXCLUDED.notion_database_id,
                api_rate_limit = COALESCE($5, api_settings.api_rate_limit),
                execution_delay = COALESCE($6, api_settings.execution_delay),
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiSettings>(&query)
            .bind(input.workspace_id)
            .bind(&input.gemini_api_key)
            .bind(&input.notion_api_token)
            .bind(&input.notion_database_id)
            .bind(input.api_rate_limit)
            .bind(input.execution_delay)
            .fetch_one(pool)
            .await
    }

    /// Delete a workspace's settings. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, workspace_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM api_settings WHERE workspace_id = $1")
            .bind(workspace_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
