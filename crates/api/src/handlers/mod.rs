pub mod api_settings;
pub mod execute;
pub mod execution_log;
pub mod notion;
pub mod project;
pub mod prompt_template;
pub mod usage;
pub mod workspace;
