//! Repository for the `prompt_templates` table.

use sqlx::PgPool;
use strata_core::types::DbId;

use crate::models::prompt_template::{CreatePromptTemplate, PromptTemplate, UpdatePromptTemplate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, workspace_id, order_index, phase, title, main_question, overview, \
     deliverables, tags, prompt_content, variables, is_active, is_custom, \
     created_at, updated_at";

/// Provides CRUD operations for prompt templates.
pub struct PromptTemplateRepo;

impl PromptTemplateRepo {
    /// Insert a new template, returning the created row.
    ///
    /// `is_active` defaults to true, `is_custom` to true (system-provided
    /// templates are seeded with `is_custom = false`).
    pub async fn create(
        pool: &PgPool,
        input: &CreatePromptTemplate,
    ) -> Result<PromptTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompt_templates (workspace_id, order_index, phase, title,
                                           main_question, overview, deliverables, tags,
                                           prompt_content, variables, is_active, is_custom)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     COALESCE($11, TRUE), COALESCE($12, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptTemplate>(&query)
            .bind(input.workspace_id)
            .bind(input.order_index)
            .bind(&input.phase)
            .bind(&input.title)
            .bind(&input.main_question)
            .bind(&input.overview)
            .bind(&input.deliverables)
            .bind(&input.tags)
            .bind(&input.prompt_content)
            .bind(&input.variables)
            .bind(input.is_active)
            .bind(input.is_custom)
            .fetch_one(pool)
            .await
    }

    /// Find a template by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PromptTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompt_templates WHERE id = $1");
        sqlx::query_as::<_, PromptTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a workspace's templates ordered by `order_index` ascending,
    /// optionally filtered to active / inactive.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
        is_active: Option<bool>,
    ) -> Result<Vec<PromptTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_templates
             WHERE workspace_id = $1 AND ($2::boolean IS NULL OR is_active = $2)
             ORDER BY order_index ASC"
        );
        sqlx::query_as::<_, PromptTemplate>(&query)
            .bind(workspace_id)
            .bind(is_active)
            .fetch_all(pool)
            .await
    }

    /// Load a selection of templates by id, scoped to a workspace.
    ///
    /// Returned in `order_index` ascending order — the stored order
    /// governs batch execution sequence, not the selection list's order.
    pub async fn list_by_ids(
        pool: &PgPool,
        workspace_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<PromptTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_templates
             WHERE workspace_id = $1 AND id = ANY($2)
             ORDER BY order_index ASC"
        );
        sqlx::query_as::<_, PromptTemplate>(&query)
            .bind(workspace_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a template. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePromptTemplate,
    ) -> Result<Option<PromptTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE prompt_templates SET
                order_index = COALESCE($2, order_index),
                phase = COALESCE($3, phase),
                title = COALESCE($4, title),
                main_question = COALESCE($5, main_question),
                overview = COALESCE($6, overview),
                deliverables = COALESCE($7, deliverables),
                tags = COALESCE($8, tags),
                prompt_content = COALESCE($9, prompt_content),
                variables = COALESCE($10, variables),
                is_active = COALESCE($11, is_active),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptTemplate>(&query)
            .bind(id)
            .bind(input.order_index)
            .bind(&input.phase)
            .bind(&input.title)
            .bind(&input.main_question)
            .bind(&input.overview)
            .bind(&input.deliverables)
            .bind(&input.tags)
            .bind(&input.prompt_content)
            .bind(&input.variables)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a user-authored template by deactivating it.
    ///
    /// Returns `true` if a row was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE prompt_templates SET is_active = FALSE, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
