/// RESOLVE → PATCH → PERSIST engine
///
/// Runs the whole relink once, front to back. Any failure ends the run; nothing
/// is retried and nothing is written unless patching completed.

use crate::config::LinkTables;
use crate::store::WorkflowStorage;
use crate::workflow::{
    patcher::{self, PatchReport},
    IdResolver, Node, ResolvedIds, RouterTemplate,
};
use thiserror::Error;

/// Fatal outcomes of a relink run
#[derive(Debug, Error)]
pub enum RelinkError {
    #[error("workflow '{name}' not found")]
    TargetNotFound { name: String },

    #[error("nodes of workflow '{name}' are not a JSON node list: {source}")]
    MalformedNodes {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("update of workflow '{name}' exited with {exit_code}")]
    WriteFailed { name: String, exit_code: i32 },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// What a successful run did
#[derive(Debug, Clone)]
pub struct RelinkOutcome {
    pub resolved: ResolvedIds,
    pub report: PatchReport,
    /// The node list as written back
    pub nodes: Vec<Node>,
}

pub struct RelinkEngine {
    storage: WorkflowStorage,
    tables: LinkTables,
    orchestrator_name: String,
}

impl RelinkEngine {
    pub fn new(storage: WorkflowStorage, tables: LinkTables, orchestrator_name: String) -> Self {
        Self {
            storage,
            tables,
            orchestrator_name,
        }
    }

    pub fn orchestrator_name(&self) -> &str {
        &self.orchestrator_name
    }

    pub async fn run(&self) -> Result<RelinkOutcome, RelinkError> {
        // RESOLVE
        let resolved = IdResolver::new(&self.storage).resolve(&self.tables).await;

        let raw_nodes = self
            .storage
            .load_nodes(&self.orchestrator_name)
            .await?
            .ok_or_else(|| RelinkError::TargetNotFound {
                name: self.orchestrator_name.clone(),
            })?;

        let mut nodes: Vec<Node> =
            serde_json::from_str(&raw_nodes).map_err(|source| RelinkError::MalformedNodes {
                name: self.orchestrator_name.clone(),
                source,
            })?;
        tracing::info!("📥 Loaded {} nodes from '{}'", nodes.len(), self.orchestrator_name);

        // PATCH
        let js_code = RouterTemplate::new(resolved.generator_routes()).render();
        let report = patcher::patch_nodes(&mut nodes, &resolved, &js_code);

        // PERSIST
        let exit_code = self.storage.save_nodes(&self.orchestrator_name, &nodes).await?;
        if exit_code != 0 {
            return Err(RelinkError::WriteFailed {
                name: self.orchestrator_name.clone(),
                exit_code,
            });
        }

        tracing::info!(
            "💾 Wrote {} nodes ({} relinked, router {})",
            nodes.len(),
            report.relinked.len(),
            if report.router_regenerated { "regenerated" } else { "untouched" }
        );

        Ok(RelinkOutcome {
            resolved,
            report,
            nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::ScriptedRunner;
    use crate::workflow::types::{CODE_NODE_TYPE, EXECUTE_WORKFLOW_NODE_TYPE, ROUTER_NODE_NAME};
    use serde_json::json;
    use std::sync::Arc;

    const ORCHESTRATOR: &str = "01 - Main Orchestrator";

    fn orchestrator_nodes() -> String {
        json!([
            { "id": "n1", "name": "Fetch Company Snippet", "type": EXECUTE_WORKFLOW_NODE_TYPE,
              "typeVersion": 1.1, "position": [200, 0],
              "parameters": { "workflowId": { "__rl": true, "value": "stale-11", "mode": "list" } } },
            { "id": "n2", "name": "Generate Visuals", "type": EXECUTE_WORKFLOW_NODE_TYPE,
              "parameters": { "workflowId": { "__rl": true, "value": "stale-16", "mode": "list" } } },
            { "id": "n3", "name": ROUTER_NODE_NAME, "type": CODE_NODE_TYPE,
              "parameters": { "jsCode": "// exported body with O'Brien's ids" } },
            { "id": "n4", "name": "Combine Context", "type": "n8n-nodes-base.merge",
              "parameters": {} }
        ])
        .to_string()
    }

    fn engine(runner: ScriptedRunner) -> (RelinkEngine, Arc<ScriptedRunner>) {
        let runner = Arc::new(runner);
        let engine = RelinkEngine::new(
            WorkflowStorage::new(runner.clone()),
            LinkTables::default(),
            ORCHESTRATOR.to_string(),
        );
        (engine, runner)
    }

    fn resolving_runner() -> ScriptedRunner {
        ScriptedRunner::new()
            .workflow_id("11 - Company Snippet Fetcher", "wf-123")
            .workflow_id("12 - Corporate Overview Generator", "g1")
            .workflow_id("13 - Product Datasheet Generator", "g2")
            .workflow_id("14 - Higher Ed One-Pager Generator", "g3")
    }

    #[tokio::test]
    async fn patches_and_writes_orchestrator() {
        let (engine, runner) = engine(
            resolving_runner().reply("SELECT nodes FROM workflow_entity", &orchestrator_nodes()),
        );

        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome.nodes[0].workflow_id(), Some("wf-123"));
        // "16 - Visual Asset Generator" is not in the store
        assert_eq!(outcome.nodes[1].workflow_id(), Some("stale-16"));
        assert!(outcome.report.router_regenerated);

        let code = outcome.nodes[2].parameters["jsCode"].as_str().unwrap();
        let g1 = code.find("generator_id: 'g1'").unwrap();
        let g2 = code.find("generator_id: 'g2'").unwrap();
        let g3 = code.find("generator_id: 'g3'").unwrap();
        assert!(g1 < g2 && g2 < g3);

        let executed = runner.executed();
        let updates: Vec<_> = executed
            .iter()
            .filter(|sql| sql.trim_start().starts_with("UPDATE"))
            .collect();
        assert_eq!(updates.len(), 1);
        assert!(updates[0].contains("WHERE name = '01 - Main Orchestrator';"));
    }

    #[tokio::test]
    async fn written_nodes_match_patched_nodes() {
        let (engine, runner) = engine(
            resolving_runner().reply("SELECT nodes FROM workflow_entity", &orchestrator_nodes()),
        );
        let outcome = engine.run().await.unwrap();

        let update = runner
            .executed()
            .into_iter()
            .find(|sql| sql.trim_start().starts_with("UPDATE"))
            .unwrap();
        let start = update.find("SET nodes = '").unwrap() + "SET nodes = '".len();
        let end = update.find("'::jsonb").unwrap();
        let written: Vec<Node> =
            serde_json::from_str(&update[start..end].replace("''", "'")).unwrap();

        assert_eq!(written, outcome.nodes);
        assert_eq!(written[3].rest["id"], json!("n4"));
        assert_eq!(written[0].rest["position"], json!([200, 0]));
    }

    #[tokio::test]
    async fn missing_orchestrator_writes_nothing() {
        let (engine, runner) = engine(resolving_runner());

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, RelinkError::TargetNotFound { ref name } if name == ORCHESTRATOR));
        assert!(!runner
            .executed()
            .iter()
            .any(|sql| sql.trim_start().starts_with("UPDATE")));
    }

    #[tokio::test]
    async fn failed_update_is_reported() {
        let (engine, _) = engine(
            resolving_runner()
                .reply("SELECT nodes FROM workflow_entity", &orchestrator_nodes())
                .fail("UPDATE workflow_entity", 1),
        );

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, RelinkError::WriteFailed { exit_code: 1, .. }));
    }

    #[tokio::test]
    async fn malformed_nodes_abort_before_write() {
        let (engine, runner) = engine(
            resolving_runner().reply("SELECT nodes FROM workflow_entity", "{\"not\": \"a list\"}"),
        );

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, RelinkError::MalformedNodes { .. }));
        assert!(!runner
            .executed()
            .iter()
            .any(|sql| sql.trim_start().starts_with("UPDATE")));
    }
}
