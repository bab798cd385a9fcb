//! Plan operation - full compile from manifest to resource plan.

use std::{fs, path::PathBuf};

use eyre::{Context, Result};
use gantry_compiler::pipeline::{Pipeline, SnapshotPlugin};
use gantry_compiler::surface::{ComputedData, DisplayStyle, RouteTree};
use gantry_compiler::Planner;
use gantry_manifest::Manifest;

use crate::reports::PlanReport;

/// Options for the plan operation.
pub struct PlanOptions {
    /// Write the plan JSON here, if set.
    pub out: Option<PathBuf>,
    /// Whether to dump phase snapshots.
    pub visualize: bool,
    /// Where phase snapshots land.
    pub debug_dir: PathBuf,
}

/// Execute the plan operation.
///
/// Runs the pipeline, assembles the plan, and optionally writes the plan
/// JSON and phase snapshots.
pub fn plan(manifest: &Manifest, opts: &PlanOptions) -> Result<PlanReport> {
    let mut pipeline = Pipeline::new();
    if opts.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(&opts.debug_dir));
    }

    let ctx = pipeline
        .run(manifest.clone())
        .wrap_err("Pipeline failed")?;

    let warnings: Vec<String> = ctx
        .warnings()
        .map(|d| match &d.location {
            Some(location) => format!("{} (at {})", d.message, location),
            None => d.message.clone(),
        })
        .collect();

    let computed = ctx.computed.clone().unwrap_or_else(ComputedData::default);
    let tree = match &ctx.surface {
        Some(surface) => RouteTree::new(surface)
            .display_style(DisplayStyle::WithMethods)
            .render(),
        None => String::new(),
    };

    let plan = Planner::from_context(ctx)
        .assemble()
        .wrap_err("Plan assembly failed")?;

    let written = match &opts.out {
        Some(path) => {
            let json = plan.to_json().wrap_err("Failed to serialize plan")?;
            fs::write(path, json)
                .wrap_err_with(|| format!("Failed to write plan to {}", path.display()))?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(PlanReport {
        gateway: manifest.gateway.name.clone(),
        stage: manifest.gateway.stage.clone(),
        warnings,
        route_count: computed.route_count,
        method_count: computed.method_count,
        binding_count: computed.binding_count,
        tree,
        node_count: plan.graph.len(),
        kind_counts: plan
            .graph
            .kind_counts()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        fingerprint: plan.fingerprint.clone(),
        exports: plan.outputs.exports(),
        written,
        debug_dir: opts.visualize.then(|| opts.debug_dir.clone()),
    })
}
