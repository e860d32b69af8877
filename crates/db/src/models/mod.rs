pub mod api_settings;
pub mod execution_log;
pub mod project;
pub mod prompt_template;
pub mod usage_log;
pub mod workspace;
