/// wf-relink: fix workflow ids in the Main Orchestrator after an n8n import
/// 
/// Takes no arguments. Configuration comes from RELINK_* environment variables.
/// Exits 0 when the orchestrator was written back, 1 otherwise.

use std::process::ExitCode;
use wf_relink::{config::Config, run_relink};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = Config::default();

    match run_relink(config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
