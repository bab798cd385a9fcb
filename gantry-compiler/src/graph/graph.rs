//! The append-only resource graph.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{NodeId, NodeKind, OutputRef};

/// One declared provider resource.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceNode {
    pub id: NodeId,
    /// Logical name, unique within the graph.
    pub name: String,
    pub kind: NodeKind,
    /// Nodes that must be applied before this one.
    pub depends_on: Vec<NodeId>,
}

/// The full dependency-ordered resource graph of one build.
///
/// Nodes are only ever appended; ids are insertion indices, so a node's
/// dependencies always precede it. The graph serializes to deterministic
/// JSON; that artifact is the plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceGraph {
    nodes: Vec<ResourceNode>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node with no dependencies.
    pub fn declare(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        self.declare_with_deps(name, kind, Vec::new())
    }

    /// Declare a node that must be applied after `depends_on`.
    pub fn declare_with_deps(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        depends_on: Vec<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ResourceNode {
            id,
            name: name.into(),
            kind,
            depends_on,
        });
        id
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if the id came from a different graph.
    pub fn node(&self, id: NodeId) -> &ResourceNode {
        &self.nodes[id.0]
    }

    /// The logical name of a node.
    pub fn name_of(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    /// All nodes in insertion (dependency) order.
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// An [`OutputRef`] to an attribute this node exposes after apply.
    pub fn output(&self, id: NodeId, attribute: &str) -> OutputRef {
        OutputRef::new(id, self.name_of(id), attribute)
    }

    /// Number of nodes in the given resource family.
    pub fn count(&self, label: &str) -> usize {
        self.nodes.iter().filter(|n| n.kind.label() == label).count()
    }

    /// Node counts per resource family, sorted by label.
    pub fn kind_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.kind.label()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ParentRef;

    #[test]
    fn test_declare_assigns_sequential_ids() {
        let mut graph = ResourceGraph::new();
        let api = graph.declare("todoApi", NodeKind::RestApi { description: None });
        let pool = graph.declare("todoApiUserPool", NodeKind::UserPool);

        assert_eq!(api.index(), 0);
        assert_eq!(pool.index(), 1);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.name_of(pool), "todoApiUserPool");
    }

    #[test]
    fn test_dependencies_precede_dependents() {
        let mut graph = ResourceGraph::new();
        let api = graph.declare("api", NodeKind::RestApi { description: None });
        let resource = graph.declare_with_deps(
            "item",
            NodeKind::Resource {
                rest_api: api,
                parent: ParentRef::Root,
                path_part: "item".into(),
            },
            vec![api],
        );

        for dep in &graph.node(resource).depends_on {
            assert!(dep.index() < resource.index());
        }
    }

    #[test]
    fn test_kind_counts() {
        let mut graph = ResourceGraph::new();
        graph.declare("api", NodeKind::RestApi { description: None });
        graph.declare("pool", NodeKind::UserPool);
        graph.declare("pool2", NodeKind::UserPool);

        assert_eq!(graph.count("user_pool"), 2);
        assert_eq!(graph.kind_counts()["rest_api"], 1);
    }

    #[test]
    fn test_output_uses_node_name() {
        let mut graph = ResourceGraph::new();
        let api = graph.declare("todoApi", NodeKind::RestApi { description: None });
        let exec = graph.output(api, "execution_arn");
        assert_eq!(exec.placeholder(), "${todoApi.execution_arn}");
        assert_eq!(exec.node(), api);
    }
}
