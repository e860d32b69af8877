//! Single-step executor.
//!
//! Runs one (project, template, phase) attempt end to end: prompt
//! resolution, substitution and splicing, the generation call, optional
//! archival, and the execution-log lifecycle around it all.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::PgPool;
use strata_core::prompt::validate_phase_number;
use strata_core::splice::splice_previous_output;
use strata_core::substitution::substitute;
use strata_core::types::DbId;
use strata_db::models::api_settings::ApiSettings;
use strata_db::models::project::Project;
use strata_db::models::prompt_template::PromptTemplate;
use strata_db::models::usage_log::{SERVICE_GEMINI, SERVICE_NOTION};
use strata_db::repositories::{
    ApiSettingsRepo, ExecutionLogRepo, ProjectRepo, PromptTemplateRepo,
};

use crate::services::{DocumentArchiver, TextGenerator};
use crate::usage::UsageTracker;

/// Outcome of one successfully executed step.
#[derive(Debug, Clone)]
pub struct StepResult {
    pub log_id: DbId,
    pub output: String,
    pub execution_time_ms: i64,
    /// Archival page id, when archival was enabled, configured, and
    /// succeeded.
    pub notion_page_id: Option<String>,
}

/// Failures a step can surface. Archival failure is deliberately not
/// here: it is swallowed into `notion_page_id = None`.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// The generation service failed, timed out, or returned an error
    /// status.
    #[error("generation failed: {0}")]
    Upstream(String),

    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Seam between the batch orchestrator and the step executor. Batch
/// policy tests drive fake runners through this trait without a
/// database or external services.
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run_step(
        &self,
        project_id: DbId,
        template_id: DbId,
        phase: i32,
        previous_output: Option<&str>,
        archive: bool,
    ) -> Result<StepResult, StepError>;
}

/// Executes single steps against the record store and the injected
/// generation/archival services.
pub struct StepExecutor {
    pool: PgPool,
    generator: Arc<dyn TextGenerator>,
    archiver: Arc<dyn DocumentArchiver>,
    usage: UsageTracker,
}

impl StepExecutor {
    pub fn new(
        pool: PgPool,
        generator: Arc<dyn TextGenerator>,
        archiver: Arc<dyn DocumentArchiver>,
        usage: UsageTracker,
    ) -> Self {
        Self {
            pool,
            generator,
            archiver,
            usage,
        }
    }

    /// Run one (project, template, phase) attempt.
    ///
    /// Lifecycle:
    /// 1. Load project, template, and workspace settings.
    /// 2. Create an execution-log row and mark it running.
    /// 3. Resolve the phase body, substitute project fields, splice the
    ///    previous phase's output.
    /// 4. Call the generation service, timed.
    /// 5. On success, archive best-effort when enabled and configured.
    /// 6. Finalize the log row (best-effort either way).
    pub async fn execute_step(
        &self,
        project_id: DbId,
        template_id: DbId,
        phase: i32,
        previous_output: Option<&str>,
        archive: bool,
    ) -> Result<StepResult, StepError> {
        validate_phase_number(phase).map_err(|e| StepError::InvalidTemplate(e.to_string()))?;

        let (project, template, settings) = self.load_context(project_id, template_id).await?;
        let api_key = settings
            .gemini_api_key
            .clone()
            .ok_or_else(|| StepError::Configuration("generation API key is not set".into()))?;

        let log = ExecutionLogRepo::create(&self.pool, project.id, template.id, phase).await?;
        ExecutionLogRepo::mark_running(&self.pool, log.id).await?;

        match self
            .run_phase(&project, &template, &settings, &api_key, phase, previous_output, archive)
            .await
        {
            Ok((output, execution_time_ms, notion_page_id)) => {
                if let Err(e) = ExecutionLogRepo::complete(
                    &self.pool,
                    log.id,
                    &output,
                    execution_time_ms,
                    notion_page_id.as_deref(),
                )
                .await
                {
                    tracing::warn!(log_id = log.id, "failed to finalize execution log: {e}");
                }
                Ok(StepResult {
                    log_id: log.id,
                    output,
                    execution_time_ms,
                    notion_page_id,
                })
            }
            Err(err) => {
                // Best-effort: a log-write failure must not replace the
                // step error it was recording.
                if let Err(e) = ExecutionLogRepo::fail(&self.pool, log.id, &err.to_string()).await {
                    tracing::warn!(log_id = log.id, "failed to finalize execution log: {e}");
                }
                Err(err)
            }
        }
    }

    async fn load_context(
        &self,
        project_id: DbId,
        template_id: DbId,
    ) -> Result<(Project, PromptTemplate, ApiSettings), StepError> {
        let project = ProjectRepo::find_by_id(&self.pool, project_id)
            .await?
            .ok_or(StepError::NotFound {
                entity: "project",
                id: project_id,
            })?;
        let template = PromptTemplateRepo::find_by_id(&self.pool, template_id)
            .await?
            .filter(|t| t.workspace_id == project.workspace_id)
            .ok_or(StepError::NotFound {
                entity: "prompt template",
                id: template_id,
            })?;
        let settings = ApiSettingsRepo::find_by_workspace(&self.pool, project.workspace_id)
            .await?
            .ok_or_else(|| {
                StepError::Configuration("API settings are not configured for this workspace".into())
            })?;
        Ok((project, template, settings))
    }

    /// Prompt assembly, generation, and archival. Log lifecycle is the
    /// caller's concern.
    #[allow(clippy::too_many_arguments)]
    async fn run_phase(
        &self,
        project: &Project,
        template: &PromptTemplate,
        settings: &ApiSettings,
        api_key: &str,
        phase: i32,
        previous_output: Option<&str>,
        archive: bool,
    ) -> Result<(String, i64, Option<String>), StepError> {
        let content = template
            .content()
            .map_err(|e| StepError::InvalidTemplate(e.to_string()))?;
        let body = content
            .phase(phase)
            .ok_or_else(|| StepError::InvalidTemplate(format!("phase {phase} body is missing")))?;

        let mut prompt = substitute(&body.content, &project.substitution_fields());
        if phase > 1 {
            prompt = splice_previous_output(&prompt, phase, previous_output.unwrap_or(""));
        }

        let started = Instant::now();
        let generated = self.generator.generate(api_key, &prompt).await;
        let execution_time_ms = started.elapsed().as_millis() as i64;

        let endpoint = "generateContent";
        let output = match generated {
            Ok(output) => {
                self.usage
                    .record(
                        project.workspace_id,
                        SERVICE_GEMINI,
                        endpoint,
                        Some(execution_time_ms),
                        None,
                    )
                    .await;
                output
            }
            Err(e) => {
                self.usage
                    .record(
                        project.workspace_id,
                        SERVICE_GEMINI,
                        endpoint,
                        Some(execution_time_ms),
                        Some(&e.to_string()),
                    )
                    .await;
                return Err(StepError::Upstream(e.to_string()));
            }
        };

        let notion_page_id = if archive && settings.notion_configured() {
            self.archive_output(project, template, settings, phase, &output)
                .await
        } else {
            None
        };

        Ok((output, execution_time_ms, notion_page_id))
    }

    /// Archival never fails the step; failures trace and return `None`.
    async fn archive_output(
        &self,
        project: &Project,
        template: &PromptTemplate,
        settings: &ApiSettings,
        phase: i32,
        output: &str,
    ) -> Option<String> {
        // notion_configured() was checked by the caller.
        let (token, database_id) = match (&settings.notion_api_token, &settings.notion_database_id)
        {
            (Some(token), Some(database_id)) => (token, database_id),
            _ => return None,
        };
        let title = format!("{} - {} (Phase {phase})", project.name, template.title);

        let started = Instant::now();
        let archived = self
            .archiver
            .archive(token, database_id, &title, output)
            .await;
        let elapsed_ms = started.elapsed().as_millis() as i64;

        match archived {
            Ok(page_id) => {
                self.usage
                    .record(project.workspace_id, SERVICE_NOTION, "pages", Some(elapsed_ms), None)
                    .await;
                Some(page_id)
            }
            Err(e) => {
                tracing::warn!(
                    project_id = project.id,
                    template_id = template.id,
                    phase,
                    "archival failed, continuing without a page reference: {e}"
                );
                self.usage
                    .record(
                        project.workspace_id,
                        SERVICE_NOTION,
                        "pages",
                        Some(elapsed_ms),
                        Some(&e.to_string()),
                    )
                    .await;
                None
            }
        }
    }
}

#[async_trait]
impl StepRunner for StepExecutor {
    async fn run_step(
        &self,
        project_id: DbId,
        template_id: DbId,
        phase: i32,
        previous_output: Option<&str>,
        archive: bool,
    ) -> Result<StepResult, StepError> {
        self.execute_step(project_id, template_id, phase, previous_output, archive)
            .await
    }
}
