//! Project entity model and DTOs.
//!
//! A project is one business profile inside a workspace. Projects are
//! never hard-deleted; deletion archives them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strata_core::substitution::{
    FIELD_BUDGET_RANGE, FIELD_COMPANY_NAME, FIELD_COMPETITORS, FIELD_INDUSTRY,
    FIELD_MAIN_PRODUCT_SERVICE, FIELD_TARGET_MARKET,
};
use strata_core::types::{DbId, Timestamp};

/// Freshly created, not yet executed.
pub const PROJECT_DRAFT: &str = "draft";
/// A batch is (or has been) running against this project.
pub const PROJECT_ACTIVE: &str = "active";
/// A batch ran to full, unaborted completion.
pub const PROJECT_COMPLETED: &str = "completed";
/// Soft-deleted.
pub const PROJECT_ARCHIVED: &str = "archived";

/// All valid project statuses.
pub const VALID_PROJECT_STATUSES: &[&str] =
    &[PROJECT_DRAFT, PROJECT_ACTIVE, PROJECT_COMPLETED, PROJECT_ARCHIVED];

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub workspace_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub company_name: String,
    pub industry: String,
    pub target_market: Option<String>,
    pub main_product_service: Option<String>,
    pub competitors: Option<Vec<String>>,
    pub budget_range: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Field map handed to the substitution engine.
    ///
    /// Unset optional fields substitute as the empty string; the
    /// competitor list is joined with `", "`.
    pub fn substitution_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (FIELD_COMPANY_NAME, self.company_name.clone()),
            (FIELD_INDUSTRY, self.industry.clone()),
            (
                FIELD_TARGET_MARKET,
                self.target_market.clone().unwrap_or_default(),
            ),
            (
                FIELD_MAIN_PRODUCT_SERVICE,
                self.main_product_service.clone().unwrap_or_default(),
            ),
            (
                FIELD_COMPETITORS,
                self.competitors
                    .as_ref()
                    .map(|c| c.join(", "))
                    .unwrap_or_default(),
            ),
            (
                FIELD_BUDGET_RANGE,
                self.budget_range.clone().unwrap_or_default(),
            ),
        ]
    }
}

/// DTO for creating a new project. Status always starts as `draft`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub workspace_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub company_name: String,
    pub industry: String,
    pub target_market: Option<String>,
    pub main_product_service: Option<String>,
    pub competitors: Option<Vec<String>>,
    pub budget_range: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub target_market: Option<String>,
    pub main_product_service: Option<String>,
    pub competitors: Option<Vec<String>>,
    pub budget_range: Option<String>,
    pub status: Option<String>,
}
