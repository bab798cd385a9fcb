//! Compilation pipeline and plan assembly for the gantry route-tree compiler.
//!
//! The crate is split along the two halves of a build:
//!
//! - [`pipeline`] - validate → lower → analyze. Takes a parsed manifest,
//!   runs configurable lints, lowers it to the [`gantry_ir::ApiSurface`],
//!   and computes shared analysis data. Produces a [`pipeline::CompileContext`].
//! - [`assemble`] - the plan assembler. Consumes the compile context and a
//!   [`provision::Provisioner`] and deterministically wires the provider
//!   resource graph: gateway resources, methods, integrations, permission
//!   grants, mock CORS responses, and the fingerprint-triggered deployment.
//!
//! ```text
//! gantry.toml → Manifest → Pipeline (validate, lower, analyze)
//!                              ↓
//!                        CompileContext → Planner::assemble() → Plan
//! ```
//!
//! The assembler performs no concurrent work of its own; it only describes
//! a static dependency DAG. Applying the plan is the provisioning
//! substrate's job and is out of scope here.

pub mod assemble;
mod error;
pub mod fingerprint;
pub mod graph;
pub mod pipeline;
pub mod provision;
pub mod surface;

pub use assemble::{Plan, PlanOutputs, Planner};
pub use error::CompileError;
