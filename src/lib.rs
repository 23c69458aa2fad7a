/// wf-relink: re-link an imported n8n orchestrator workflow
/// 
/// After a workflow set is imported into a fresh n8n instance, every workflow gets a
/// new id while the exported JSON still points at the old ones. This library looks up
/// the current ids by name, patches the orchestrator's execute-workflow nodes and its
/// generator router code, and writes the node graph back.

// Environment-driven configuration and the name lookup tables
pub mod config;

// Store access layer - psql subprocess or direct Postgres, plus workflow_entity queries
pub mod store;

// Node graph layer - types, id resolution, patching and router code generation
pub mod workflow;

// RESOLVE → PATCH → PERSIST engine
pub mod runtime;

// Application setup and run entry point
pub mod app;

// Re-export commonly used types for external consumers
pub use app::run_relink;
pub use config::{Config, LinkTables};
pub use runtime::{RelinkEngine, RelinkError, RelinkOutcome};
pub use workflow::Node;
