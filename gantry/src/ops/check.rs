//! Check operation - manifest validation.

use std::path::Path;

use eyre::Result;
use gantry_compiler::pipeline::{
    CompileContext, Phase,
    phases::{AnalyzePhase, LowerPhase, ValidatePhase},
};
use gantry_compiler::surface::{DisplayStyle, RouteTree};
use gantry_manifest::Manifest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the lints without aborting on the first error so every finding is
/// listed, then lowers the surface for the summary when the lints pass.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let mut ctx = CompileContext::new(manifest.clone());
    ValidatePhase::new().check_into(&mut ctx);

    let errors: Vec<String> = ctx.errors().map(format_diagnostic).collect();
    let warnings: Vec<String> = ctx.warnings().map(format_diagnostic).collect();

    let mut route_count = 0;
    let mut method_count = 0;
    let mut tree = None;
    if errors.is_empty() {
        LowerPhase.run(&mut ctx)?;
        AnalyzePhase.run(&mut ctx)?;

        if let Some(surface) = &ctx.surface {
            route_count = surface.routes.len();
            method_count = surface.method_count();
            tree = Some(
                RouteTree::new(surface)
                    .display_style(DisplayStyle::WithMethods)
                    .render(),
            );
        }
    }

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        errors,
        warnings,
        gateway: manifest.gateway.name.clone(),
        stage: manifest.gateway.stage.clone(),
        route_count,
        method_count,
        tree,
    })
}

fn format_diagnostic(diag: &gantry_compiler::pipeline::Diagnostic) -> String {
    match &diag.location {
        Some(location) => format!("{}\n  --> {}", diag.message, location),
        None => diag.message.clone(),
    }
}
