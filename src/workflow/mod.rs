/// Workflow Graph Layer
/// 
/// This module handles the n8n node graph of the orchestrator record:
/// - Type definitions (Node and the node type tags)
/// - Name → id resolution against the store
/// - In-place relinking of execute-workflow nodes
/// - Regeneration of the "Route to Generators" code body

// Core node type definitions
pub mod types;

// Link table resolution against workflow_entity
pub mod resolver;

// In-place node patching
pub mod patcher;

// Templated JavaScript for the router code node
pub mod router_code;

// Re-export commonly used types
pub use patcher::PatchReport;
pub use resolver::{IdResolver, ResolvedIds};
pub use router_code::{GeneratorRoute, RouterTemplate};
pub use types::Node;
