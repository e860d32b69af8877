//! Prompt template entity model and DTOs.
//!
//! Templates are the ordered, reusable units of work a batch executes.
//! `prompt_content` is stored as jsonb but must always parse into the
//! typed three-phase structure (validated at create/update time).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strata_core::error::CoreError;
use strata_core::prompt::PromptContent;
use strata_core::types::{DbId, Timestamp};

/// A prompt template row from the `prompt_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptTemplate {
    pub id: DbId,
    pub workspace_id: DbId,
    /// Governs batch execution order (ascending).
    pub order_index: i32,
    /// Coarse grouping label, unrelated to the 1-3 execution phase number.
    pub phase: String,
    pub title: String,
    pub main_question: String,
    pub overview: String,
    pub deliverables: String,
    pub tags: Vec<String>,
    pub prompt_content: serde_json::Value,
    pub variables: Vec<String>,
    pub is_active: bool,
    pub is_custom: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PromptTemplate {
    /// Parse the stored jsonb into the typed three-phase structure.
    pub fn content(&self) -> Result<PromptContent, CoreError> {
        PromptContent::from_json(&self.prompt_content)
    }
}

/// DTO for creating a new prompt template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePromptTemplate {
    pub workspace_id: DbId,
    pub order_index: i32,
    pub phase: String,
    pub title: String,
    pub main_question: String,
    pub overview: String,
    pub deliverables: String,
    pub tags: Vec<String>,
    pub prompt_content: serde_json::Value,
    pub variables: Vec<String>,
    pub is_active: Option<bool>,
    pub is_custom: Option<bool>,
}

/// DTO for updating an existing prompt template. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePromptTemplate {
    pub order_index: Option<i32>,
    pub phase: Option<String>,
    pub title: Option<String>,
    pub main_question: Option<String>,
    pub overview: Option<String>,
    pub deliverables: Option<String>,
    pub tags: Option<Vec<String>>,
    pub prompt_content: Option<serde_json::Value>,
    pub variables: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
