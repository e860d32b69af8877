//! Repository for the `projects` table.

use sqlx::PgPool;
use strata_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject, PROJECT_ARCHIVED};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, workspace_id, name, description, company_name, industry, \
     target_market, main_product_service, competitors, budget_range, status, \
     created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in `draft` status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (workspace_id, name, description, company_name, industry,
                                   target_market, main_product_service, competitors, budget_range)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.workspace_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.company_name)
            .bind(&input.industry)
            .bind(&input.target_market)
            .bind(&input.main_product_service)
            .bind(&input.competitors)
            .bind(&input.budget_range)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a workspace's projects, most recently updated first.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE workspace_id = $1 ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                company_name = COALESCE($4, company_name),
                industry = COALESCE($5, industry),
                target_market = COALESCE($6, target_market),
                main_product_service = COALESCE($7, main_product_service),
                competitors = COALESCE($8, competitors),
                budget_range = COALESCE($9, budget_range),
                status = COALESCE($10, status),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.company_name)
            .bind(&input.industry)
            .bind(&input.target_market)
            .bind(&input.main_product_service)
            .bind(&input.competitors)
            .bind(&input.budget_range)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Set a project's lifecycle status. Returns `true` if a row changed.
    pub async fn set_status(pool: &PgPool, id: DbId, status: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE projects SET status = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(status)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Archive a project (projects are never hard-deleted).
    ///
    /// Returns `true` if a row was archived.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::set_status(pool, id, PROJECT_ARCHIVED).await
    }
}
