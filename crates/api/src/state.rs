use std::sync::Arc;

use strata_pipeline::{
    BatchRunner, DocumentArchiver, StepExecutor, TextGenerator, UsageTracker,
};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: strata_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Single-step executor over the injected generation/archival services.
    pub executor: Arc<StepExecutor>,
    /// Batch orchestrator driving the executor.
    pub batch_runner: Arc<BatchRunner>,
}

impl AppState {
    /// Wire up the pipeline services around a pool and configuration.
    ///
    /// Tests pass stub generator/archiver implementations here; the
    /// binary passes the real Gemini and Notion backed ones.
    pub fn new(
        pool: strata_db::DbPool,
        config: ServerConfig,
        generator: Arc<dyn TextGenerator>,
        archiver: Arc<dyn DocumentArchiver>,
    ) -> Self {
        let executor = Arc::new(StepExecutor::new(
            pool.clone(),
            generator,
            archiver,
            UsageTracker::new(pool.clone()),
        ));
        let batch_runner = Arc::new(BatchRunner::new(pool.clone(), executor.clone()));
        Self {
            pool,
            config: Arc::new(config),
            executor,
            batch_runner,
        }
    }
}
