//! Plan assembly.
//!
//! The [`Planner`] is the top-level orchestrator: table → site → api →
//! authorizer → resource tree → method/integration wiring → deployment →
//! stage. It owns the [`context::BuildContext`] (every list and map the
//! build accumulates) and returns a [`Plan`] carrying the finished graph,
//! its fingerprint, and the externally meaningful outputs.
//!
//! Assembly is deterministic, synchronous graph construction. Any failure
//! is a configuration defect: the error propagates and no partial plan
//! escapes.

mod binder;
mod context;
mod deploy;
mod tree;
mod wire;

use std::collections::BTreeMap;

use gantry_ir::ApiSurface;
use serde::Serialize;

pub use context::BuildContext;

use crate::CompileError;
use crate::graph::{NodeKind, OutputRef, ResourceGraph};
use crate::pipeline::CompileContext;
use crate::provision::{DeclaredProvisioner, Provisioner};

/// The finished artifact of one build.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// The dependency-ordered resource graph.
    pub graph: ResourceGraph,
    /// SHA-256 digest of the assembled API definition.
    pub fingerprint: String,
    /// Externally meaningful identifiers.
    pub outputs: PlanOutputs,
}

impl Plan {
    /// Render the plan as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Identifiers resolved once the substrate applies the plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutputs {
    pub rest_api_id: OutputRef,
    pub stage_name: String,
    pub invoke_url: OutputRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_bucket: Option<OutputRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

impl PlanOutputs {
    /// The outputs as (name, value) export pairs, in a stable order.
    pub fn exports(&self) -> Vec<(String, String)> {
        let mut exports = vec![
            ("rest_api_id".to_string(), self.rest_api_id.placeholder()),
            ("stage_name".to_string(), self.stage_name.clone()),
            ("backend_invoke_url".to_string(), self.invoke_url.placeholder()),
        ];
        if let Some(url) = &self.website_url {
            exports.push(("website_url".to_string(), url.clone()));
        }
        if let Some(bucket) = &self.frontend_bucket {
            exports.push(("frontend_bucket".to_string(), bucket.placeholder()));
        }
        if let Some(table) = &self.table_name {
            exports.push(("table_name".to_string(), table.clone()));
        }
        exports
    }
}

/// Top-level plan assembler.
pub struct Planner<P: Provisioner = DeclaredProvisioner> {
    surface: ApiSurface,
    provisioner: P,
}

impl Planner<DeclaredProvisioner> {
    /// Build a planner over a compile context, declaring resources into
    /// the plan graph.
    ///
    /// # Panics
    ///
    /// Panics if the context was not produced by a full pipeline run
    /// (the lower phase must have populated the surface).
    pub fn from_context(mut ctx: CompileContext) -> Self {
        Self::with_provisioner(ctx.take_surface(), DeclaredProvisioner)
    }
}

impl<P: Provisioner> Planner<P> {
    /// Build a planner with a custom provisioner.
    pub fn with_provisioner(surface: ApiSurface, provisioner: P) -> Self {
        Self {
            surface,
            provisioner,
        }
    }

    /// Assemble the full plan.
    pub fn assemble(mut self) -> Result<Plan, CompileError> {
        let mut ctx = BuildContext::new();
        let mut env_overrides = BTreeMap::new();
        let mut policies = Vec::new();

        // Orchestrator-level collaborators come first: the table feeds the
        // functions' environment and policies, the site feeds the
        // authorizer's redirect target.
        let table_name = match &self.surface.table {
            Some(table) => {
                self.provisioner.provision_table(&mut ctx.graph, table)?;
                env_overrides.insert(table.env_var.clone(), table.name.clone());
                policies.push(format!("{}ReadWrite", table.name));
                Some(table.name.clone())
            }
            None => None,
        };

        let site = match &self.surface.site {
            Some(spec) => Some(
                self.provisioner
                    .provision_static_site(&mut ctx.graph, spec)?,
            ),
            None => None,
        };

        let api = ctx.graph.declare(
            self.surface.meta.name.clone(),
            NodeKind::RestApi {
                description: self.surface.meta.description.clone(),
            },
        );

        let authorizer = if self.surface.has_authenticated() {
            let auth = self
                .surface
                .auth
                .as_ref()
                .ok_or(CompileError::MissingAuthConfig)?;
            let redirect_url = auth
                .redirect_url
                .clone()
                .or_else(|| site.as_ref().map(|s| s.url.clone()))
                .ok_or(CompileError::MissingRedirect)?;
            Some(self.provisioner.provision_authorizer(
                &mut ctx.graph,
                api,
                &auth.domain,
                &redirect_url,
            )?)
        } else {
            None
        };

        tree::build(&self.surface, api, &mut ctx)?;
        wire::wire(
            &self.surface,
            api,
            authorizer,
            &mut self.provisioner,
            &mut ctx,
            &env_overrides,
            &policies,
        )?;
        let deployed = deploy::deploy(&self.surface.meta, api, &mut ctx);

        let outputs = PlanOutputs {
            rest_api_id: ctx.graph.output(api, "id"),
            stage_name: self.surface.meta.stage.clone(),
            invoke_url: ctx.graph.output(deployed.stage, "invoke_url"),
            website_url: site.as_ref().map(|s| s.url.clone()),
            frontend_bucket: site.as_ref().map(|s| ctx.graph.output(s.bucket, "id")),
            table_name,
        };

        Ok(Plan {
            graph: ctx.graph,
            fingerprint: deployed.fingerprint,
            outputs,
        })
    }
}
