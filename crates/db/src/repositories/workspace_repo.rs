//! Repository for the `workspaces` table.

use sqlx::PgPool;
use strata_core::types::DbId;

use crate::models::workspace::{CreateWorkspace, Workspace};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

/// Provides CRUD operations for workspaces.
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// Insert a new workspace, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWorkspace) -> Result<Workspace, sqlx::Error> {
        let query = format!(
            "INSERT INTO workspaces (name, slug, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a workspace by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE id = $1");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
