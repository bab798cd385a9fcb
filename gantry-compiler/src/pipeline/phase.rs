//! Pipeline phase trait.

use eyre::Result;

use super::CompileContext;

/// Name and description of a phase, for `gantry explain`.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the compilation pipeline.
///
/// Phases run in order and mutate the shared [`CompileContext`]: validate
/// records diagnostics, lower populates the surface IR, analyze fills the
/// computed data. Fatal failures return an error and abort the run;
/// recoverable findings belong in diagnostics.
pub trait Phase: Send + Sync {
    /// The phase name, used in diagnostics and plugin hooks.
    fn name(&self) -> &'static str;

    /// One line on what the phase does.
    fn description(&self) -> &'static str;

    /// Run this phase over the context.
    fn run(&self, ctx: &mut CompileContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
