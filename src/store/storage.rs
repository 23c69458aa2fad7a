/// workflow_entity persistence layer
///
/// Name-keyed lookups and the single UPDATE that writes the patched node graph
/// back. Statements are plain SQL text so both backends can run them.

use crate::store::QueryRunner;
use crate::workflow::types::Node;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Storage manager for n8n workflow records
#[derive(Clone)]
pub struct WorkflowStorage {
    runner: Arc<dyn QueryRunner>,
}

impl WorkflowStorage {
    pub fn new(runner: Arc<dyn QueryRunner>) -> Self {
        Self { runner }
    }

    /// Look up a workflow id by its display name
    ///
    /// Returns None when no row matches, when the query exits non-zero, or when
    /// the store cannot be reached at all. With duplicate names the first row
    /// the store returns wins.
    pub async fn find_workflow_id(&self, name: &str) -> Option<String> {
        let sql = format!(
            "SELECT id FROM workflow_entity WHERE name = {};",
            quote_literal(name)
        );

        let result = match self.runner.run(&sql).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("⚠️ Lookup of '{}' failed: {:#}", name, e);
                return None;
            }
        };

        if !result.succeeded() {
            tracing::warn!("⚠️ Lookup of '{}' exited with {}", name, result.exit_code);
            return None;
        }

        result
            .output
            .lines()
            .next()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    /// Fetch the raw `nodes` JSON of a workflow record
    pub async fn load_nodes(&self, name: &str) -> Result<Option<String>> {
        let sql = format!(
            "SELECT nodes FROM workflow_entity WHERE name = {};",
            quote_literal(name)
        );
        let result = self
            .runner
            .run(&sql)
            .await
            .with_context(|| format!("Failed to query nodes of '{}'", name))?;

        if result.output.is_empty() {
            Ok(None)
        } else {
            Ok(Some(result.output))
        }
    }

    /// Write the node graph back and refresh `updatedAt`
    ///
    /// Returns the exit code of the UPDATE; callers decide what non-zero means.
    pub async fn save_nodes(&self, name: &str, nodes: &[Node]) -> Result<i32> {
        let sql = update_nodes_sql(name, nodes)?;
        let result = self
            .runner
            .run(&sql)
            .await
            .with_context(|| format!("Failed to update nodes of '{}'", name))?;
        Ok(result.exit_code)
    }
}

/// SQL string literal with single quotes doubled
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn update_nodes_sql(name: &str, nodes: &[Node]) -> Result<String> {
    let nodes_json = serde_json::to_string(nodes).context("Failed to serialize nodes")?;
    Ok(format!(
        r#"
UPDATE workflow_entity
SET nodes = {}::jsonb,
    "updatedAt" = NOW()
WHERE name = {};
"#,
        quote_literal(&nodes_json),
        quote_literal(name)
    ))
}
