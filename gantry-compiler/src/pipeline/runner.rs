//! Pipeline orchestrator.

use eyre::Result;
use gantry_manifest::Manifest;

use super::{
    CompileContext, Phase, PhaseInfo, Plugin,
    phases::{AnalyzePhase, LowerPhase, ValidatePhase},
};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (validate, lower, analyze) followed by any user
/// phases, calling plugin hooks around each one.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::new());
/// let ctx = pipeline.run(manifest)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the default built-in phases.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Names and descriptions of every phase this pipeline would run.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        Self::builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|p| p.info())
            .collect()
    }

    fn builtin_phases() -> Vec<Box<dyn Phase>> {
        vec![
            Box::new(ValidatePhase::new()),
            Box::new(LowerPhase),
            Box::new(AnalyzePhase),
        ]
    }

    /// Run the pipeline on a manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally; in particular, the
    /// validate phase fails when any lint records an error.
    pub fn run(&self, manifest: Manifest) -> Result<CompileContext> {
        let mut ctx = CompileContext::new(manifest);

        for phase in Self::builtin_phases().iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompileContext) -> Result<()> {
        let name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        str::FromStr,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use super::*;

    struct CountingPlugin {
        before: Arc<AtomicUsize>,
        after: Arc<AtomicUsize>,
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompileContext) -> Result<()> {
            self.before.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompileContext) -> Result<()> {
            self.after.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn make_test_manifest() -> Manifest {
        Manifest::from_str(
            r#"
            [gateway]
            name = "test"

            [routes."/item".methods.GET]
            name = "getAllTodo"
            handler = "app.getAllTodo"
            auth = "none"
        "#,
        )
        .expect("manifest should parse")
    }

    #[test]
    fn test_pipeline_populates_context() {
        let ctx = Pipeline::new()
            .run(make_test_manifest())
            .expect("pipeline should succeed");

        assert!(ctx.surface.is_some());
        assert!(ctx.computed.is_some());
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_pipeline_fails_on_open_topology() {
        let manifest = Manifest::from_str(
            r#"
            [gateway]
            name = "test"

            [routes."/item/{id}".methods.GET]
            name = "getTodo"
            handler = "app.getTodo"
            auth = "none"
        "#,
        )
        .expect("manifest should parse");

        assert!(Pipeline::new().run(manifest).is_err());
    }

    #[test]
    fn test_plugin_hooks_fire_per_phase() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let plugin = CountingPlugin {
            before: before.clone(),
            after: after.clone(),
        };

        Pipeline::new()
            .plugin(plugin)
            .run(make_test_manifest())
            .expect("pipeline should succeed");

        // 3 built-in phases
        assert_eq!(before.load(Ordering::SeqCst), 3);
        assert_eq!(after.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_phase_info_lists_builtins() {
        let names: Vec<&str> = Pipeline::new()
            .phase_info()
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["validate", "lower", "analyze"]);
    }
}
