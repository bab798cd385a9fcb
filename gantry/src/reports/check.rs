//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the manifest file.
    pub config_path: PathBuf,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Gateway name.
    pub gateway: String,
    /// Stage name.
    pub stage: String,
    /// Route and method counts, present when the surface lowered cleanly.
    pub route_count: usize,
    pub method_count: usize,
    /// Rendered route tree, present when the surface lowered cleanly.
    pub tree: Option<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.errors.is_empty() || !self.warnings.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.key_value_indented("gateway", &self.gateway);
        out.key_value_indented("stage", &self.stage);
        out.newline();

        let plural = if self.route_count == 1 { "" } else { "s" };
        out.section(&format!(
            "{} route{} ({} methods)",
            self.route_count, plural, self.method_count
        ));
        if let Some(tree) = &self.tree {
            out.preformatted(tree);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_tracks_errors() {
        let mut report = CheckReport {
            config_path: "gantry.toml".into(),
            errors: vec![],
            warnings: vec!["route '/item' has no OPTIONS mock".into()],
            gateway: "todoApi".into(),
            stage: "demo".into(),
            route_count: 1,
            method_count: 2,
            tree: Some("/item [GET, POST]\n".into()),
        };
        assert!(report.is_valid());

        report.errors.push("route '/item/{id}' has no parent".into());
        assert!(!report.is_valid());
    }
}
