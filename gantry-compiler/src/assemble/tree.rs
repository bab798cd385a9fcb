//! Resource tree building.
//!
//! One gateway resource node per route path, linked to its parent. The
//! path set is validated to be closed under drop-last-segment before any
//! node is created, so a topology error never leaves a partial tree.

use gantry_ir::ApiSurface;

use super::context::BuildContext;
use crate::CompileError;
use crate::graph::{NodeId, NodeKind, ParentRef};

/// Build one gateway resource node per route, in depth order.
///
/// The surface's routes are already sorted so parents precede children; a
/// single left-to-right pass resolves every parent from the resource index.
pub(crate) fn build(
    surface: &ApiSurface,
    api: NodeId,
    ctx: &mut BuildContext,
) -> Result<(), CompileError> {
    // Closure check first: nothing is declared if any parent is missing.
    for route in &surface.routes {
        if let Some(parent) = route.parent_path() {
            if surface.route(parent).is_none() {
                return Err(CompileError::MissingParent {
                    path: route.path.clone(),
                    parent: parent.to_string(),
                });
            }
        }
    }

    for route in &surface.routes {
        let parent = match route.parent_path() {
            None => ParentRef::Root,
            Some(parent_path) => {
                let id = ctx.resources.get(parent_path).copied().ok_or_else(|| {
                    CompileError::MissingParent {
                        path: route.path.clone(),
                        parent: parent_path.to_string(),
                    }
                })?;
                ParentRef::Resource(id)
            }
        };

        let mut depends_on = vec![api];
        if let ParentRef::Resource(parent_id) = parent {
            depends_on.push(parent_id);
        }

        let id = ctx.graph.declare_with_deps(
            route.name.clone(),
            NodeKind::Resource {
                rest_api: api,
                parent,
                path_part: route.path_part().to_string(),
            },
            depends_on,
        );
        ctx.resources.insert(route.path.clone(), id);
        ctx.deploy_deps.push(id);
    }

    Ok(())
}
