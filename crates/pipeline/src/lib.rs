//! Execution pipeline: single-step prompt execution and multi-template
//! batch orchestration over the external generation and archival
//! services.

pub mod batch;
pub mod services;
pub mod step;
pub mod usage;

pub use batch::{BatchOutcome, BatchRunner, ExecutionResult, ExecutionSettings};
pub use services::{
    ArchiveError, DocumentArchiver, GeminiGenerator, GenerateError, NotionArchiver, TextGenerator,
};
pub use step::{StepError, StepExecutor, StepResult, StepRunner};
pub use usage::UsageTracker;
