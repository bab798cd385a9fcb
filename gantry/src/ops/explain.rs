//! Explain operation - pipeline explanation.

use std::path::Path;

use eyre::{Context, Result};
use gantry_compiler::pipeline::{Pipeline, phases::ValidatePhase};
use gantry_manifest::Manifest;

use crate::reports::{AnalysisResult, ExplainReport, LintEntry, ManifestInfo, PhaseEntry};

/// Execute the explain operation.
///
/// Runs the pipeline and returns information about what it does and found.
pub fn explain(manifest: &Manifest, config_path: &Path) -> Result<ExplainReport> {
    let pipeline = Pipeline::new();

    let phases: Vec<PhaseEntry> = pipeline
        .phase_info()
        .into_iter()
        .map(|p| PhaseEntry {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();

    let lints: Vec<LintEntry> = ValidatePhase::new()
        .lint_info()
        .into_iter()
        .map(|l| LintEntry {
            name: l.name.to_string(),
            description: l.description.to_string(),
        })
        .collect();

    let ctx = pipeline
        .run(manifest.clone())
        .wrap_err("Pipeline failed")?;
    let computed = ctx
        .computed
        .as_ref()
        .ok_or_else(|| eyre::eyre!("pipeline did not analyze the surface"))?;

    Ok(ExplainReport {
        config_path: config_path.to_path_buf(),
        manifest: ManifestInfo {
            gateway: manifest.gateway.name.clone(),
            stage: manifest.gateway.stage.clone(),
        },
        phases,
        lints,
        analysis: AnalysisResult {
            route_count: computed.route_count,
            method_count: computed.method_count,
            binding_count: computed.binding_count,
            mock_count: computed.mock_count,
            has_auth: computed.has_auth,
            has_table: computed.has_table,
            has_site: computed.has_site,
            route_paths: computed.route_paths.clone(),
        },
    })
}
