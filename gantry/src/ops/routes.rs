//! Routes operation - route tree listing.

use eyre::{Context, Result};
use gantry_compiler::pipeline::Pipeline;
use gantry_compiler::surface::{DisplayStyle, RouteTree};
use gantry_manifest::Manifest;

use crate::reports::RoutesReport;

/// Execute the routes operation.
pub fn routes(manifest: &Manifest, style: DisplayStyle) -> Result<RoutesReport> {
    let ctx = Pipeline::new()
        .run(manifest.clone())
        .wrap_err("Pipeline failed")?;

    let surface = ctx
        .surface
        .as_ref()
        .ok_or_else(|| eyre::eyre!("pipeline did not lower the surface"))?;
    let tree = RouteTree::new(surface).display_style(style).render();

    Ok(RoutesReport {
        gateway: manifest.gateway.name.clone(),
        route_count: surface.routes.len(),
        method_count: surface.method_count(),
        tree,
    })
}
