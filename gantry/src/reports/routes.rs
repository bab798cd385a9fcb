//! Routes command report data structures.

use super::output::{Output, Report};

/// Report data for the route listing.
#[derive(Debug)]
pub struct RoutesReport {
    /// Gateway name.
    pub gateway: String,
    /// Route and method counts.
    pub route_count: usize,
    pub method_count: usize,
    /// Rendered route tree in the requested style.
    pub tree: String,
}

impl Report for RoutesReport {
    fn render(&self, out: &mut dyn Output) {
        let plural = if self.route_count == 1 { "" } else { "s" };
        out.section(&format!(
            "{}: {} route{} ({} methods)",
            self.gateway, self.route_count, plural, self.method_count
        ));
        out.preformatted(&self.tree);
    }
}
