//! Workspace entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strata_core::types::{DbId, Timestamp};

/// A workspace row from the `workspaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workspace {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkspace {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}
