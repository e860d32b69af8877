mod api_settings_repo;
mod execution_log_repo;
mod project_repo;
mod prompt_template_repo;
mod usage_log_repo;
mod workspace_repo;

pub use api_settings_repo::ApiSettingsRepo;
pub use execution_log_repo::ExecutionLogRepo;
pub use project_repo::ProjectRepo;
pub use prompt_template_repo::PromptTemplateRepo;
pub use usage_log_repo::UsageLogRepo;
pub use workspace_repo::WorkspaceRepo;
