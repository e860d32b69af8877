//! Per-workspace API settings model and DTOs.
//!
//! Holds the generation-service key, the archival-service token and target
//! database, and execution tunables. Read-only from the orchestrator's
//! perspective. Secrets are masked in every HTTP response.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strata_core::types::{DbId, Timestamp};

/// Default requests-per-minute budget against the generation service.
pub const DEFAULT_API_RATE_LIMIT: i32 = 60;

/// Default pacing delay between batch steps, in seconds.
pub const DEFAULT_EXECUTION_DELAY_SECS: i32 = 30;

/// Replacement string for secrets in HTTP responses.
pub const SECRET_MASK: &str = "********";

/// An `api_settings` row. One per workspace.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApiSettings {
    pub id: DbId,
    pub workspace_id: DbId,
    pub gemini_api_key: Option<String>,
    pub notion_api_token: Option<String>,
    pub notion_database_id: Option<String>,
    pub api_rate_limit: i32,
    pub execution_delay: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ApiSettings {
    /// Archival is attempted only when both the token and the target
    /// database id are configured.
    pub fn notion_configured(&self) -> bool {
        self.notion_api_token.is_some() && self.notion_database_id.is_some()
    }

    /// Response view with secrets replaced by [`SECRET_MASK`].
    pub fn masked(&self) -> MaskedApiSettings {
        MaskedApiSettings {
            id: self.id,
            workspace_id: self.workspace_id,
            gemini_api_key: self.gemini_api_key.as_ref().map(|_| SECRET_MASK),
            notion_api_token: self.notion_api_token.as_ref().map(|_| SECRET_MASK),
            notion_database_id: self.notion_database_id.clone(),
            api_rate_limit: self.api_rate_limit,
            execution_delay: self.execution_delay,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// [`ApiSettings`] with secret fields masked, safe to serialize to clients.
#[derive(Debug, Clone, Serialize)]
pub struct MaskedApiSettings {
    pub id: DbId,
    pub workspace_id: DbId,
    pub gemini_api_key: Option<&'static str>,
    pub notion_api_token: Option<&'static str>,
    pub notion_database_id: Option<String>,
    pub api_rate_limit: i32,
    pub execution_delay: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a workspace's settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertApiSettings {
    pub workspace_id: DbId,
    pub gemini_api_key: Option<String>,
    pub notion_api_token: Option<String>,
    pub notion_database_id: Option<String>,
    pub api_rate_limit: Option<i32>,
    pub execution_delay: Option<i32>,
}
