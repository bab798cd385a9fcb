//! Build context for one plan assembly.

use indexmap::IndexMap;

use crate::graph::{NodeId, ResourceGraph};
use crate::provision::Binding;

/// All state accumulated while assembling one plan.
///
/// The original shape of this compiler kept these as module-level lists and
/// maps mutated across calls; here they are owned by the [`super::Planner`]
/// and threaded explicitly, so builds are independent and re-runnable.
#[derive(Debug, Default)]
pub struct BuildContext {
    /// The plan graph under construction.
    pub graph: ResourceGraph,
    /// Path → gateway resource node, populated in dependency order by the
    /// tree builder and read by the wirer for parent/resource lookup.
    pub resources: IndexMap<String, NodeId>,
    /// Function name → backend binding, written exactly once per function
    /// by the binder and read-only afterwards.
    pub bindings: IndexMap<String, Binding>,
    /// Every node the deployment must be declared dependent on: gateway
    /// resources, methods, integrations, and responses. The substrate does
    /// not infer this ordering for the deployment resource family.
    pub deploy_deps: Vec<NodeId>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }
}
