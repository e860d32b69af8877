//! Batch orchestrator.
//!
//! Walks an ordered list of prompt templates for one project, drives
//! each template's three phases through the step executor in strict
//! sequence, threads phase outputs forward, paces calls against the
//! shared rate limit, and applies the stop-on-error vs. skip-on-error
//! policy.
//!
//! No mutual exclusion across batches: two concurrent batches on one
//! project race on the same log stream and project status. Callers are
//! expected to run at most one batch per project at a time.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use strata_core::prompt::PHASE_COUNT;
use strata_core::types::DbId;
use strata_db::models::project::{PROJECT_ACTIVE, PROJECT_COMPLETED};
use strata_db::repositories::{ProjectRepo, PromptTemplateRepo};

use crate::step::{StepError, StepRunner};

/// Caller-supplied knobs for one batch run.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionSettings {
    /// Pacing delay between steps, in seconds.
    pub execution_delay: u64,
    /// `false`: a failed step aborts the whole batch. `true`: a failed
    /// step abandons the rest of its template only.
    pub skip_on_error: bool,
    /// Whether successful outputs are archived.
    pub notion_integration: bool,
}

/// One attempted (template, phase) step inside a batch.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub template_id: DbId,
    pub template_title: String,
    pub phase: i32,
    pub success: bool,
    pub output: Option<String>,
    pub error: Option<String>,
    pub log_id: Option<DbId>,
    pub notion_page_id: Option<String>,
    pub execution_time_ms: Option<i64>,
}

/// Aggregate report of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub results: Vec<ExecutionResult>,
    pub total_executions: usize,
    pub successful_executions: usize,
    pub failed_executions: usize,
    /// `Some` when a stop-on-error failure aborted the batch; names the
    /// failing template and phase. `results` then holds the partial
    /// trail collected up to the abort.
    pub aborted: Option<String>,
}

impl BatchOutcome {
    fn from_results(results: Vec<ExecutionResult>, aborted: Option<String>) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            total_executions: results.len(),
            successful_executions: successful,
            failed_executions: results.len() - successful,
            results,
            aborted,
        }
    }
}

/// Execution plan entry: one template to run, in stored order.
#[derive(Debug, Clone)]
struct PlanEntry {
    template_id: DbId,
    title: String,
}

/// Orchestrates batch runs: loads the plan, drives phases through the
/// step runner, and moves the project's lifecycle status.
pub struct BatchRunner {
    pool: PgPool,
    runner: Arc<dyn StepRunner>,
}

impl BatchRunner {
    pub fn new(pool: PgPool, runner: Arc<dyn StepRunner>) -> Self {
        Self { pool, runner }
    }

    /// Run a batch for `project_id` over the selected templates.
    ///
    /// `template_ids` is a selection filter only: execution order is
    /// the stored `order_index`, ascending. The project goes `active`
    /// when the batch starts and `completed` only when the batch runs
    /// to full, unaborted completion.
    pub async fn run_batch(
        &self,
        project_id: DbId,
        template_ids: &[DbId],
        settings: &ExecutionSettings,
    ) -> Result<BatchOutcome, StepError> {
        let project = ProjectRepo::find_by_id(&self.pool, project_id)
            .await?
            .ok_or(StepError::NotFound {
                entity: "project",
                id: project_id,
            })?;

        let templates =
            PromptTemplateRepo::list_by_ids(&self.pool, project.workspace_id, template_ids).await?;
        if templates.is_empty() {
            return Err(StepError::InvalidTemplate(
                "selection matched no templates in the project's workspace".into(),
            ));
        }
        let plan: Vec<PlanEntry> = templates
            .into_iter()
            .map(|t| PlanEntry {
                template_id: t.id,
                title: t.title,
            })
            .collect();

        ProjectRepo::set_status(&self.pool, project_id, PROJECT_ACTIVE).await?;

        tracing::info!(
            project_id,
            templates = plan.len(),
            skip_on_error = settings.skip_on_error,
            "starting batch execution"
        );

        let outcome = run_plan(self.runner.as_ref(), project_id, &plan, settings).await;

        if outcome.aborted.is_none() {
            ProjectRepo::set_status(&self.pool, project_id, PROJECT_COMPLETED).await?;
        }
        tracing::info!(
            project_id,
            total = outcome.total_executions,
            failed = outcome.failed_executions,
            aborted = outcome.aborted.is_some(),
            "batch execution finished"
        );
        Ok(outcome)
    }
}

/// The policy core: strictly sequential phase walk with output
/// threading, pacing, and the error policy. Pure of the database so it
/// can be exercised with fake runners.
async fn run_plan(
    runner: &dyn StepRunner,
    project_id: DbId,
    plan: &[PlanEntry],
    settings: &ExecutionSettings,
) -> BatchOutcome {
    let mut results: Vec<ExecutionResult> = Vec::new();

    for (index, entry) in plan.iter().enumerate() {
        // Outputs chain across phases of one template only; they never
        // carry into the next template.
        let mut previous_output: Option<String> = None;

        for phase in 1..=PHASE_COUNT {
            let is_final_step = index == plan.len() - 1 && phase == PHASE_COUNT;

            let step = runner
                .run_step(
                    project_id,
                    entry.template_id,
                    phase,
                    previous_output.as_deref(),
                    settings.notion_integration,
                )
                .await;

            match step {
                Ok(result) => {
                    results.push(ExecutionResult {
                        template_id: entry.template_id,
                        template_title: entry.title.clone(),
                        phase,
                        success: true,
                        output: Some(result.output.clone()),
                        error: None,
                        log_id: Some(result.log_id),
                        notion_page_id: result.notion_page_id,
                        execution_time_ms: Some(result.execution_time_ms),
                    });
                    previous_output = Some(result.output);

                    if !is_final_step && settings.execution_delay > 0 {
                        tokio::time::sleep(Duration::from_secs(settings.execution_delay)).await;
                    }
                }
                Err(err) => {
                    let message = err.to_string();
                    results.push(ExecutionResult {
                        template_id: entry.template_id,
                        template_title: entry.title.clone(),
                        phase,
                        success: false,
                        output: None,
                        error: Some(message.clone()),
                        log_id: None,
                        notion_page_id: None,
                        execution_time_ms: None,
                    });

                    if !settings.skip_on_error {
                        let reason = format!(
                            "batch aborted: template '{}' phase {phase} failed: {message}",
                            entry.title
                        );
                        tracing::warn!(project_id, template_id = entry.template_id, phase, "{reason}");
                        return BatchOutcome::from_results(results, Some(reason));
                    }

                    // Skip policy: abandon the remaining phases of this
                    // template, move on to the next one. No rows are
                    // written for the unattempted phases.
                    tracing::warn!(
                        project_id,
                        template_id = entry.template_id,
                        phase,
                        "step failed, skipping the rest of this template: {message}"
                    );
                    break;
                }
            }
        }
    }

    BatchOutcome::from_results(results, None)
}
