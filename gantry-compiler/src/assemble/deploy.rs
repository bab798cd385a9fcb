//! Redeployment trigger.
//!
//! The deployment node is declared dependent on every resource, method,
//! integration, and response created so far, and carries the definition
//! fingerprint as its change trigger: the substrate only creates a new
//! revision when the trigger value moved. A stage is then published
//! against the deployment.

use std::collections::BTreeMap;

use gantry_ir::ApiMeta;

use super::context::BuildContext;
use crate::fingerprint;
use crate::graph::{NodeId, NodeKind};

pub(crate) struct Deployed {
    pub stage: NodeId,
    pub fingerprint: String,
}

/// Declare the deployment and stage for the assembled definition.
pub(crate) fn deploy(meta: &ApiMeta, api: NodeId, ctx: &mut BuildContext) -> Deployed {
    let definition = fingerprint::api_definition(&ctx.graph);
    let digest = fingerprint::fingerprint(&definition);

    let mut triggers = BTreeMap::new();
    triggers.insert("redeployment".to_string(), digest.clone());

    let mut depends_on = vec![api];
    depends_on.extend(ctx.deploy_deps.iter().copied());

    let deployment = ctx.graph.declare_with_deps(
        format!("{}Deployment", meta.name),
        NodeKind::Deployment {
            rest_api: api,
            triggers,
        },
        depends_on,
    );
    let stage = ctx.graph.declare_with_deps(
        format!("{}Stage", meta.name),
        NodeKind::Stage {
            rest_api: api,
            deployment,
            stage_name: meta.stage.clone(),
        },
        vec![deployment],
    );

    Deployed {
        stage,
        fingerprint: digest,
    }
}
