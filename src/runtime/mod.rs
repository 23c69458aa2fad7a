/// Relink Run Orchestration
/// 
/// Drives the three sequential phases of a run:
/// - RESOLVE: look up current workflow ids by name
/// - PATCH: relink execute-workflow nodes and regenerate the router code
/// - PERSIST: write the node graph back with a refreshed timestamp

pub mod engine;

pub use engine::{RelinkEngine, RelinkError, RelinkOutcome};
