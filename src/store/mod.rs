/// Store Access Layer
///
/// Everything that talks to the n8n Postgres database:
/// - QueryRunner trait with psql-subprocess and direct tokio-postgres backends
/// - WorkflowStorage for the `workflow_entity` lookups and the final update

use anyhow::Result;
use async_trait::async_trait;

// psql over `docker exec` (default backend)
pub mod command;

// Direct tokio-postgres connection rendered like `psql -t -A`
pub mod postgres;

// workflow_entity queries built on top of a QueryRunner
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use command::PsqlCommandRunner;
pub use postgres::PostgresQueryRunner;
pub use storage::WorkflowStorage;

/// Text output of one query plus the exit code of whatever ran it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutput {
    /// Standard output with leading/trailing whitespace stripped
    pub output: String,
    /// Process exit code (0 on success, -1 if killed by a signal)
    pub exit_code: i32,
}

impl QueryOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes one SQL statement against the store
///
/// Output follows psql tuple-only unaligned mode: one line per row, columns
/// separated by `|`. A non-zero exit code is not an `Err`; only a failure to
/// reach the store at all (spawn, connect, pipe I/O) is.
#[async_trait]
pub trait QueryRunner: Send + Sync {
    async fn run(&self, sql: &str) -> Result<QueryOutput>;
}
