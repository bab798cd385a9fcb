//! Explain command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug)]
pub struct ExplainReport {
    /// Path to the manifest file.
    pub config_path: PathBuf,
    /// Manifest information.
    pub manifest: ManifestInfo,
    /// Pipeline phases.
    pub phases: Vec<PhaseEntry>,
    /// Validation lints.
    pub lints: Vec<LintEntry>,
    /// Analysis results from running the pipeline.
    pub analysis: AnalysisResult,
}

/// Information extracted from the manifest.
#[derive(Debug)]
pub struct ManifestInfo {
    pub gateway: String,
    pub stage: String,
}

/// One pipeline phase.
#[derive(Debug)]
pub struct PhaseEntry {
    pub name: String,
    pub description: String,
}

/// One validation lint.
#[derive(Debug)]
pub struct LintEntry {
    pub name: String,
    pub description: String,
}

/// Analysis results from running the pipeline.
#[derive(Debug)]
pub struct AnalysisResult {
    pub route_count: usize,
    pub method_count: usize,
    pub binding_count: usize,
    pub mock_count: usize,
    pub has_auth: bool,
    pub has_table: bool,
    pub has_site: bool,
    /// Route paths in assembly order.
    pub route_paths: Vec<String>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Gantry Pipeline Explanation");
        out.newline();

        out.key_value("Input", &self.config_path.display().to_string());
        out.key_value_indented("gateway", &self.manifest.gateway);
        out.key_value_indented("stage", &self.manifest.stage);
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        out.section("Analysis Results");
        out.key_value_indented(
            "Routes",
            &format!(
                "{} routes, {} methods ({} bindings, {} mocks)",
                self.analysis.route_count,
                self.analysis.method_count,
                self.analysis.binding_count,
                self.analysis.mock_count
            ),
        );
        out.key_value_indented("Authorizer", yes_no(self.analysis.has_auth));
        out.key_value_indented("Table", yes_no(self.analysis.has_table));
        out.key_value_indented("Site", yes_no(self.analysis.has_site));
        out.newline();

        out.section("Assembly Order");
        for path in &self.analysis.route_paths {
            out.list_item(path);
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
