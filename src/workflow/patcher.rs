/// In-place node graph patching
///
/// Nodes are matched by predicate, never by position. Order and count of the
/// node list never change; only `workflowId.value` and `jsCode` are touched.

use crate::workflow::resolver::ResolvedIds;
use crate::workflow::types::Node;

/// One execute-workflow node that now points at a new id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relinked {
    pub node_name: String,
    pub previous_id: Option<String>,
    pub workflow_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub relinked: Vec<Relinked>,
    pub router_regenerated: bool,
}

/// Point every known execute-workflow node at its resolved id
///
/// Nodes whose name is not in the table, or whose target was not found, are
/// left as they are.
pub fn relink_execute_nodes(nodes: &mut [Node], resolved: &ResolvedIds) -> Vec<Relinked> {
    let mut relinked = Vec::new();

    for node in nodes.iter_mut().filter(|n| n.is_execute_workflow()) {
        let Some(name) = node.name.clone() else {
            continue;
        };

        let Some(workflow_id) = resolved.id_for_node(&name) else {
            tracing::debug!("⏭️ Skipping {}: no resolved workflow id", name);
            continue;
        };

        let previous_id = node.workflow_id().map(str::to_string);
        node.set_workflow_id(workflow_id);
        tracing::info!("  Updated {} -> {}", name, workflow_id);

        relinked.push(Relinked {
            node_name: name,
            previous_id,
            workflow_id: workflow_id.to_string(),
        });
    }

    relinked
}

/// Replace the body of every "Route to Generators" code node
///
/// Returns false when the graph has no such node.
pub fn regenerate_router(nodes: &mut [Node], js_code: &str) -> bool {
    let mut replaced = false;
    for node in nodes.iter_mut().filter(|n| n.is_router()) {
        node.set_js_code(js_code);
        replaced = true;
    }

    if replaced {
        tracing::info!("  Updated Route to Generators code");
    } else {
        tracing::warn!("⚠️ No 'Route to Generators' code node found; router left as is");
    }
    replaced
}

/// Apply both patches to the node list
pub fn patch_nodes(nodes: &mut [Node], resolved: &ResolvedIds, js_code: &str) -> PatchReport {
    PatchReport {
        relinked: relink_execute_nodes(nodes, resolved),
        router_regenerated: regenerate_router(nodes, js_code),
    }
}
