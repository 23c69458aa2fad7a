/// Application setup
/// 
/// Wires together configuration, the store backend, storage and the relink engine,
/// and maps the run outcome to the lines an operator sees.

use crate::{
    config::Config,
    runtime::{RelinkEngine, RelinkError, RelinkOutcome},
    store::{PostgresQueryRunner, PsqlCommandRunner, QueryRunner, WorkflowStorage},
};
use std::sync::Arc;

/// Build the relink engine for the configured store backend
///
/// A database URL selects the direct tokio-postgres backend; otherwise every
/// statement goes through psql.
pub async fn create_engine(config: Config) -> Result<RelinkEngine, RelinkError> {
    let runner: Arc<dyn QueryRunner> = match &config.store.database_url {
        Some(url) => Arc::new(PostgresQueryRunner::connect(url).await?),
        None => {
            let runner = PsqlCommandRunner::from_config(&config.store);
            tracing::info!("🐘 Using `{}`", runner.command_line());
            Arc::new(runner)
        }
    };

    Ok(RelinkEngine::new(
        WorkflowStorage::new(runner),
        config.links,
        config.orchestrator_name,
    ))
}

/// Run the relink once with the given configuration
pub async fn run_relink(config: Config) -> Result<RelinkOutcome, RelinkError> {
    tracing::info!("=== Fixing Workflow IDs in {} ===", config.orchestrator_name);

    let engine = create_engine(config).await?;
    let name = engine.orchestrator_name().to_string();

    match engine.run().await {
        Ok(outcome) => {
            tracing::info!("✓ {} updated successfully!", name);
            Ok(outcome)
        }
        Err(e) => {
            match &e {
                RelinkError::TargetNotFound { name } => {
                    tracing::error!("ERROR: {} not found!", name);
                }
                RelinkError::WriteFailed { name, .. } => {
                    tracing::error!("✗ Failed to update {}", name);
                }
                _ => {}
            }
            tracing::error!("❌ Relink failed: {}", e);
            Err(e)
        }
    }
}
