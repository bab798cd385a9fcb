//! Pipeline snapshot plugin for visualization and debugging.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use eyre::Result;
use gantry_ir::ApiSurface;
use serde::Serialize;

use super::{CompileContext, Diagnostic, Plugin};
use crate::surface::ComputedData;

/// The pipeline state captured after one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// The lowered surface (available after the lower phase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<ApiSurface>,

    /// Analysis data (available after the analyze phase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed: Option<ComputedData>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures the pipeline state after each phase.
///
/// Used by `gantry plan --visualize` to dump intermediate representations
/// under the debug directory.
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes `<phase>.json` files under a
    /// directory as phases complete.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// All snapshots collected so far.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots.read().unwrap().clone()
    }

    /// Write all collected snapshots to a directory.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for snapshot in self.snapshots.read().unwrap().iter() {
            write_snapshot(dir, snapshot)?;
        }

        Ok(())
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompileContext) -> Result<()> {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            surface: ctx.surface.clone(),
            computed: ctx.computed.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };

        if let Some(dir) = &self.output_dir {
            fs::create_dir_all(dir)?;
            write_snapshot(dir, &snapshot)?;
        }

        self.snapshots.write().unwrap().push(snapshot);
        Ok(())
    }
}
