//! Compilation pipeline.
//!
//! A [`Pipeline`] runs the built-in phases (validate → lower → analyze)
//! over a parsed manifest, collecting diagnostics along the way and
//! producing a [`CompileContext`] for the plan assembler. Plugins hook in
//! before and after each phase; the [`SnapshotPlugin`] uses that to dump
//! the intermediate state for `--visualize`.
//!
//! # Example
//!
//! ```ignore
//! use gantry_compiler::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(manifest)?;
//! for diag in &ctx.diagnostics {
//!     eprintln!("{diag}");
//! }
//! let plan = Planner::from_context(ctx).assemble()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompileContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
