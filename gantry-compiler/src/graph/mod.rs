//! The provider resource graph.
//!
//! A plan is an append-only graph of typed resource declarations with
//! explicit `depends_on` edges. The assembler only describes the graph;
//! applying it, concurrently where edges allow and serialized where they
//! don't, belongs to the provisioning substrate.

mod graph;
mod node;

pub use graph::{ResourceGraph, ResourceNode};
pub use node::{IntegrationSpec, NodeId, NodeKind, OutputRef, ParentRef};
