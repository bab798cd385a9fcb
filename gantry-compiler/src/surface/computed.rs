//! Pre-computed analysis data for the lowered surface.

use gantry_ir::{ApiSurface, HttpMethod};
use serde::Serialize;

/// Aggregated surface statistics, computed once by the analyze phase and
/// shared by reports and the assembler's callers.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ComputedData {
    /// Number of route nodes.
    pub route_count: usize,
    /// Number of (path, method) pairs.
    pub method_count: usize,
    /// Methods that bind a backend function.
    pub binding_count: usize,
    /// Methods that terminate locally as mocks.
    pub mock_count: usize,
    /// Whether any method requires the shared authorizer.
    pub has_auth: bool,
    /// Whether a storage table is configured.
    pub has_table: bool,
    /// Whether a static site is configured.
    pub has_site: bool,
    /// Deepest path in the tree.
    pub max_depth: usize,
    /// Route paths in assembly order.
    pub route_paths: Vec<String>,
    /// Distinct verbs in use, canonical order.
    pub verbs_in_use: Vec<HttpMethod>,
}

impl ComputedData {
    /// Compute all data from a lowered surface.
    pub fn from_surface(surface: &ApiSurface) -> Self {
        let functions = || surface.routes.iter().flat_map(|r| r.methods.iter());

        let binding_count = functions().filter(|(_, f)| f.integration.needs_binding()).count();
        let mock_count = functions().filter(|(_, f)| f.is_mock()).count();

        let verbs_in_use = HttpMethod::ALL
            .into_iter()
            .filter(|verb| functions().any(|(v, _)| v == verb))
            .collect();

        Self {
            route_count: surface.routes.len(),
            method_count: surface.method_count(),
            binding_count,
            mock_count,
            has_auth: surface.has_authenticated(),
            has_table: surface.table.is_some(),
            has_site: surface.site.is_some(),
            max_depth: surface.routes.iter().map(|r| r.depth).max().unwrap_or(0),
            route_paths: surface.routes.iter().map(|r| r.path.clone()).collect(),
            verbs_in_use,
        }
    }
}
