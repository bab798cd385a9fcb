//! Plan command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a full plan assembly.
#[derive(Debug)]
pub struct PlanReport {
    /// Gateway name.
    pub gateway: String,
    /// Stage name.
    pub stage: String,
    /// Warnings collected by the pipeline.
    pub warnings: Vec<String>,
    /// Route and binding counts.
    pub route_count: usize,
    pub method_count: usize,
    pub binding_count: usize,
    /// Rendered route tree.
    pub tree: String,
    /// Total declared nodes.
    pub node_count: usize,
    /// Node counts per resource family, sorted by label.
    pub kind_counts: Vec<(String, usize)>,
    /// The deployment fingerprint.
    pub fingerprint: String,
    /// Export (name, value) pairs.
    pub exports: Vec<(String, String)>,
    /// Where the plan JSON was written, if requested.
    pub written: Option<PathBuf>,
    /// Where phase snapshots were written, if requested.
    pub debug_dir: Option<PathBuf>,
}

impl Report for PlanReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        out.key_value(&self.gateway, &format!("stage '{}'", self.stage));
        out.newline();

        let plural = if self.route_count == 1 { "" } else { "s" };
        out.section(&format!(
            "{} route{}, {} methods, {} backend bindings",
            self.route_count, plural, self.method_count, self.binding_count
        ));
        out.preformatted(&self.tree);
        out.newline();

        out.section(&format!("Plan ({} nodes)", self.node_count));
        for (kind, count) in &self.kind_counts {
            out.key_value_indented(kind, &count.to_string());
        }
        out.newline();

        out.key_value("fingerprint", &self.fingerprint);
        out.newline();

        out.section("Outputs");
        for (name, value) in &self.exports {
            out.key_value_indented(name, value);
        }

        if let Some(path) = &self.written {
            out.newline();
            out.key_value("Plan written to", &path.display().to_string());
        }
        if let Some(dir) = &self.debug_dir {
            out.newline();
            out.key_value("Phase snapshots", &dir.display().to_string());
        }
    }
}
