/// Name → id resolution for the link tables
///
/// Every table entry is looked up on its own, in table order, with no caching.
/// A miss is not an error: the entry simply carries `None`.

use crate::config::{ExecuteLink, GeneratorSpec, LinkTables};
use crate::store::WorkflowStorage;
use crate::workflow::router_code::GeneratorRoute;

/// Execute link with the id found for its target workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub link: ExecuteLink,
    pub workflow_id: Option<String>,
}

/// Generator with the id found for its own workflow name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGenerator {
    pub spec: GeneratorSpec,
    pub workflow_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedIds {
    pub execute_links: Vec<ResolvedLink>,
    pub generators: Vec<ResolvedGenerator>,
}

impl ResolvedIds {
    /// Resolved id for an execute-workflow node name, if any
    ///
    /// Empty ids count as unresolved.
    pub fn id_for_node(&self, node_name: &str) -> Option<&str> {
        self.execute_links
            .iter()
            .find(|resolved| resolved.link.node_name == node_name)
            .and_then(|resolved| resolved.workflow_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Template slots for the router code node, in generator order
    pub fn generator_routes(&self) -> Vec<GeneratorRoute> {
        self.generators
            .iter()
            .map(|g| GeneratorRoute::new(&g.spec, g.workflow_id.as_deref()))
            .collect()
    }

    pub fn unresolved_count(&self) -> usize {
        self.execute_links
            .iter()
            .filter(|l| l.workflow_id.is_none())
            .count()
            + self
                .generators
                .iter()
                .filter(|g| g.workflow_id.is_none())
                .count()
    }
}

pub struct IdResolver<'a> {
    storage: &'a WorkflowStorage,
}

impl<'a> IdResolver<'a> {
    pub fn new(storage: &'a WorkflowStorage) -> Self {
        Self { storage }
    }

    /// Resolve both tables eagerly, one store round trip per entry
    pub async fn resolve(&self, tables: &LinkTables) -> ResolvedIds {
        let mut resolved = ResolvedIds::default();

        for link in &tables.execute_links {
            let workflow_id = self.storage.find_workflow_id(&link.workflow_name).await;
            resolved.execute_links.push(ResolvedLink {
                link: link.clone(),
                workflow_id,
            });
        }

        for spec in &tables.generators {
            let workflow_id = self.storage.find_workflow_id(&spec.workflow_name).await;
            resolved.generators.push(ResolvedGenerator {
                spec: spec.clone(),
                workflow_id,
            });
        }

        tracing::info!("🔎 Found workflow IDs:");
        for entry in &resolved.execute_links {
            tracing::info!(
                "  {}: {}",
                entry.link.node_name,
                entry.workflow_id.as_deref().unwrap_or("NOT FOUND")
            );
        }
        for entry in &resolved.generators {
            tracing::info!(
                "  {}: {}",
                entry.spec.workflow_name,
                entry.workflow_id.as_deref().unwrap_or("NOT FOUND")
            );
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::ScriptedRunner;
    use std::sync::Arc;

    #[tokio::test]
    async fn resolves_each_entry_in_table_order() {
        let runner = Arc::new(
            ScriptedRunner::new()
                .workflow_id("11 - Company Snippet Fetcher", "wf-123")
                .workflow_id("18 - Google Drive Uploader", "wf-up")
                .workflow_id("13 - Product Datasheet Generator", "g2"),
        );
        let storage = WorkflowStorage::new(runner.clone());
        let tables = LinkTables::default();

        let resolved = IdResolver::new(&storage).resolve(&tables).await;

        // One lookup per entry; the shared uploader is looked up twice
        let executed = runner.executed();
        assert_eq!(executed.len(), 11);
        assert_eq!(
            executed
                .iter()
                .filter(|sql| sql.contains("'18 - Google Drive Uploader'"))
                .count(),
            2
        );
        assert!(executed[0].contains("'11 - Company Snippet Fetcher'"));
        assert!(executed[8].contains("'12 - Corporate Overview Generator'"));

        assert_eq!(resolved.id_for_node("Fetch Company Snippet"), Some("wf-123"));
        assert_eq!(resolved.id_for_node("Upload Updated Docs"), Some("wf-up"));
        assert_eq!(resolved.id_for_node("Upload to Drive"), Some("wf-up"));
        assert_eq!(resolved.id_for_node("Scan Google Drive"), None);
        assert_eq!(resolved.id_for_node("Not In Table"), None);

        let ids: Vec<_> = resolved
            .generators
            .iter()
            .map(|g| g.workflow_id.as_deref())
            .collect();
        assert_eq!(ids, vec![None, Some("g2"), None]);
        assert_eq!(resolved.unresolved_count(), 7);
    }

    #[test]
    fn generator_routes_carry_empty_id_on_miss() {
        let tables = LinkTables::default();
        let resolved = ResolvedIds {
            execute_links: Vec::new(),
            generators: tables
                .generators
                .iter()
                .zip([Some("g1"), None, Some("g3")])
                .map(|(spec, id)| ResolvedGenerator {
                    spec: spec.clone(),
                    workflow_id: id.map(str::to_string),
                })
                .collect(),
        };

        let routes = resolved.generator_routes();
        let ids: Vec<_> = routes.iter().map(|r| r.generator_id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "", "g3"]);
        assert_eq!(routes[1].generator_name, "13 - Product Datasheet Generator");
    }
}
