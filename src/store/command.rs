/// psql subprocess runner
///
/// Pipes each statement into `docker exec -i <container> psql ... -t -A` and
/// captures stdout. One process per statement, no retry, no timeout.

use crate::config::StoreConfig;
use crate::store::{QueryOutput, QueryRunner};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct PsqlCommandRunner {
    /// Program to spawn (`docker` or `psql`)
    program: String,
    /// Arguments passed before the query is written to stdin
    args: Vec<String>,
}

impl PsqlCommandRunner {
    /// Build the runner from store configuration
    ///
    /// An empty container name runs `psql` on the host instead of inside docker.
    pub fn from_config(config: &StoreConfig) -> Self {
        let psql_args = vec![
            "psql".to_string(),
            "-U".to_string(),
            config.user.clone(),
            "-d".to_string(),
            config.database.clone(),
            "-t".to_string(),
            "-A".to_string(),
        ];

        if config.container.trim().is_empty() {
            let mut args = psql_args;
            let program = args.remove(0);
            Self { program, args }
        } else {
            let mut args = vec!["exec".to_string(), "-i".to_string(), config.container.clone()];
            args.extend(psql_args);
            Self {
                program: "docker".to_string(),
                args,
            }
        }
    }

    /// Runner for an arbitrary program that reads the query on stdin
    pub fn with_program(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Full command line, for log output
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl QueryRunner for PsqlCommandRunner {
    async fn run(&self, sql: &str) -> Result<QueryOutput> {
        tracing::debug!("🐘 {} <<< {} bytes of SQL", self.command_line(), sql.len());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn `{}`", self.command_line()))?;

        // Closing stdin ends the psql session
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(sql.as_bytes())
                .await
                .context("Failed to write query to stdin")?;
        }

        let output = child
            .wait_with_output()
            .await
            .context("Failed to wait for query process")?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            if exit_code == 0 {
                tracing::debug!("psql stderr: {}", stderr);
            } else {
                tracing::warn!("⚠️ psql exited with {}: {}", exit_code, stderr);
            }
        }

        Ok(QueryOutput {
            output: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            exit_code,
        })
    }
}
