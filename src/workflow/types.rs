/// n8n node graph type definitions
///
/// Only the fields the relink touches are typed; every other node field is kept
/// in a flattened map so the graph survives a decode/encode cycle unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// n8n type tag of nodes that invoke another workflow by id
pub const EXECUTE_WORKFLOW_NODE_TYPE: &str = "n8n-nodes-base.executeWorkflow";

/// n8n type tag of JavaScript code nodes
pub const CODE_NODE_TYPE: &str = "n8n-nodes-base.code";

/// Name of the code node that fans requests out to the generator workflows
pub const ROUTER_NODE_NAME: &str = "Route to Generators";

/// A single node as stored in `workflow_entity.nodes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node type tag (e.g. "n8n-nodes-base.code")
    #[serde(rename = "type", default)]
    pub node_type: String,
    /// Display name; not guaranteed unique across the graph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Type-specific parameters
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub parameters: Value,
    /// id, position, typeVersion, credentials, ...
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Node {
    pub fn is_execute_workflow(&self) -> bool {
        self.node_type == EXECUTE_WORKFLOW_NODE_TYPE
    }

    pub fn is_router(&self) -> bool {
        self.node_type == CODE_NODE_TYPE && self.name.as_deref() == Some(ROUTER_NODE_NAME)
    }

    /// Current `parameters.workflowId.value`, if present as a string
    pub fn workflow_id(&self) -> Option<&str> {
        self.parameters
            .get("workflowId")
            .and_then(|w| w.get("value"))
            .and_then(Value::as_str)
    }

    /// Point an execute-workflow node at `id`
    ///
    /// Only `workflowId.value` changes when `workflowId` is already a resource
    /// locator object. Anything else (missing, legacy plain string) is replaced
    /// by a locator in id mode.
    pub fn set_workflow_id(&mut self, id: &str) {
        let params = self.parameters_mut();
        match params.get_mut("workflowId") {
            Some(Value::Object(locator)) => {
                locator.insert("value".to_string(), Value::String(id.to_string()));
            }
            _ => {
                params.insert(
                    "workflowId".to_string(),
                    json!({ "__rl": true, "mode": "id", "value": id }),
                );
            }
        }
    }

    /// Replace the whole `parameters.jsCode` body
    pub fn set_js_code(&mut self, code: &str) {
        self.parameters_mut()
            .insert("jsCode".to_string(), Value::String(code.to_string()));
    }

    fn parameters_mut(&mut self) -> &mut Map<String, Value> {
        if !self.parameters.is_object() {
            self.parameters = Value::Object(Map::new());
        }
        match &mut self.parameters {
            Value::Object(map) => map,
            _ => unreachable!("parameters was just set to an object"),
        }
    }
}
