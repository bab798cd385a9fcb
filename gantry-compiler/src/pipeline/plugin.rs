//! Pipeline plugin hooks.

use eyre::Result;

use super::CompileContext;

/// Observer hooked around every phase of a pipeline run.
pub trait Plugin {
    /// The plugin name.
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    fn on_before_phase(&self, _phase: &str, _ctx: &mut CompileContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase ran successfully.
    fn on_after_phase(&self, _phase: &str, _ctx: &mut CompileContext) -> Result<()> {
        Ok(())
    }
}
