//! The provisioner seam.
//!
//! The compiler consumes its external collaborators (compute, identity,
//! table, and static-site provisioning) through a single trait specified
//! only at its interface. The default implementation declares provider
//! nodes into the plan graph; tests substitute recording fakes.

use std::collections::BTreeMap;

use gantry_ir::{SiteSpec, TableSpec};

use crate::CompileError;
use crate::graph::{NodeId, NodeKind, OutputRef, ResourceGraph};

/// Everything the compute provisioner needs to create one backend function.
#[derive(Debug, Clone)]
pub struct ComputeSpec<'a> {
    pub name: &'a str,
    /// Location of the executable payload.
    pub artifact: &'a str,
    pub runtime: &'a str,
    /// Entry-point identifier within the artifact.
    pub handler: &'a str,
    pub timeout: u32,
    /// Merged environment, overrides already applied.
    pub environment: BTreeMap<String, String>,
    /// Resource policy identifiers attached to the execution role.
    pub policies: &'a [String],
    pub description: &'a str,
}

/// The invocable identity and invocation handle returned for one compute
/// resource.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The created compute resource.
    pub identity: NodeId,
    /// Opaque invocation handle, used as an integration target.
    pub invoke: OutputRef,
}

/// Handles returned by the static-site provisioner.
#[derive(Debug, Clone)]
pub struct SiteHandles {
    pub bucket: NodeId,
    pub cdn: NodeId,
    /// Externally visible site URL.
    pub url: String,
}

/// The provisioning substrate, seen from the compiler.
///
/// Implementations declare resources and hand back opaque handles; they
/// never apply anything. A rejected declaration surfaces as
/// [`CompileError::Substrate`] and aborts the build.
pub trait Provisioner {
    /// Create a compute resource and return its invocation handle.
    fn provision_compute(
        &mut self,
        graph: &mut ResourceGraph,
        spec: ComputeSpec<'_>,
    ) -> Result<Binding, CompileError>;

    /// Grant `principal` permission to invoke a bound compute resource,
    /// scoped by `source_pattern`.
    fn grant_invoke(
        &mut self,
        graph: &mut ResourceGraph,
        binding: &Binding,
        principal: &str,
        source_pattern: String,
    ) -> Result<NodeId, CompileError>;

    /// Create the shared authorizer for `rest_api`, sending sign-ins back
    /// to `redirect_url`.
    fn provision_authorizer(
        &mut self,
        graph: &mut ResourceGraph,
        rest_api: NodeId,
        domain: &str,
        redirect_url: &str,
    ) -> Result<NodeId, CompileError>;

    /// Create the storage table.
    fn provision_table(
        &mut self,
        graph: &mut ResourceGraph,
        table: &TableSpec,
    ) -> Result<NodeId, CompileError>;

    /// Create the static frontend site and return its handles.
    fn provision_static_site(
        &mut self,
        graph: &mut ResourceGraph,
        site: &SiteSpec,
    ) -> Result<SiteHandles, CompileError>;
}

/// Default provisioner: every request becomes a node in the plan graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredProvisioner;

impl Provisioner for DeclaredProvisioner {
    fn provision_compute(
        &mut self,
        graph: &mut ResourceGraph,
        spec: ComputeSpec<'_>,
    ) -> Result<Binding, CompileError> {
        let identity = graph.declare(
            spec.name,
            NodeKind::Function {
                runtime: spec.runtime.to_string(),
                handler: spec.handler.to_string(),
                artifact: spec.artifact.to_string(),
                timeout: spec.timeout,
                environment: spec.environment,
                description: spec.description.to_string(),
                policies: spec.policies.to_vec(),
            },
        );
        let invoke = graph.output(identity, "invoke_arn");
        Ok(Binding { identity, invoke })
    }

    fn grant_invoke(
        &mut self,
        graph: &mut ResourceGraph,
        binding: &Binding,
        principal: &str,
        source_pattern: String,
    ) -> Result<NodeId, CompileError> {
        let name = format!("{}Permission", graph.name_of(binding.identity));
        Ok(graph.declare_with_deps(
            name,
            NodeKind::Permission {
                function: binding.identity,
                action: "lambda:InvokeFunction".to_string(),
                principal: principal.to_string(),
                source_pattern,
            },
            vec![binding.identity],
        ))
    }

    fn provision_authorizer(
        &mut self,
        graph: &mut ResourceGraph,
        rest_api: NodeId,
        domain: &str,
        redirect_url: &str,
    ) -> Result<NodeId, CompileError> {
        let api_name = graph.name_of(rest_api).to_string();

        let user_pool = graph.declare(format!("{api_name}UserPool"), NodeKind::UserPool);
        let client = graph.declare_with_deps(
            format!("{api_name}UserPoolClient"),
            NodeKind::UserPoolClient {
                user_pool,
                callback_urls: vec![redirect_url.to_string()],
            },
            vec![user_pool],
        );
        let pool_domain = graph.declare_with_deps(
            format!("{api_name}UserPoolDomain"),
            NodeKind::UserPoolDomain {
                user_pool,
                domain: domain.to_string(),
            },
            vec![user_pool],
        );
        Ok(graph.declare_with_deps(
            format!("{api_name}Authorizer"),
            NodeKind::Authorizer {
                rest_api,
                identity_source: "method.request.header.Authorization".to_string(),
                provider: user_pool,
            },
            vec![rest_api, user_pool, client, pool_domain],
        ))
    }

    fn provision_table(
        &mut self,
        graph: &mut ResourceGraph,
        table: &TableSpec,
    ) -> Result<NodeId, CompileError> {
        Ok(graph.declare(
            table.name.clone(),
            NodeKind::Table {
                hash_key: table.hash_key.clone(),
                range_key: table.range_key.clone(),
            },
        ))
    }

    fn provision_static_site(
        &mut self,
        graph: &mut ResourceGraph,
        _site: &SiteSpec,
    ) -> Result<SiteHandles, CompileError> {
        let bucket = graph.declare(
            "frontendBucket",
            NodeKind::Bucket {
                index_document: "index.html".to_string(),
            },
        );
        let cdn = graph.declare_with_deps(
            "frontendCdn",
            NodeKind::Distribution { origin: bucket },
            vec![bucket],
        );
        let url = format!("https://{}", graph.output(cdn, "domain_name").placeholder());
        Ok(SiteHandles { bucket, cdn, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_returns_invoke_handle() {
        let mut graph = ResourceGraph::new();
        let mut provisioner = DeclaredProvisioner;

        let binding = provisioner
            .provision_compute(
                &mut graph,
                ComputeSpec {
                    name: "getAllTodo",
                    artifact: "./backend/getAllTodo",
                    runtime: "nodejs16.x",
                    handler: "app.getAllTodo",
                    timeout: 30,
                    environment: BTreeMap::new(),
                    policies: &[],
                    description: "getAllTodo",
                },
            )
            .expect("compute should provision");

        assert_eq!(binding.invoke.placeholder(), "${getAllTodo.invoke_arn}");
        assert_eq!(graph.count("function"), 1);
    }

    #[test]
    fn test_grant_depends_on_function() {
        let mut graph = ResourceGraph::new();
        let mut provisioner = DeclaredProvisioner;

        let binding = provisioner
            .provision_compute(
                &mut graph,
                ComputeSpec {
                    name: "addTodo",
                    artifact: "./backend/addTodo",
                    runtime: "nodejs16.x",
                    handler: "app.addToDoItem",
                    timeout: 30,
                    environment: BTreeMap::new(),
                    policies: &[],
                    description: "addTodo",
                },
            )
            .expect("compute should provision");
        let permission = provisioner
            .grant_invoke(
                &mut graph,
                &binding,
                "apigateway.amazonaws.com",
                "${api.execution_arn}/*/POST/item".to_string(),
            )
            .expect("grant should provision");

        assert!(graph.node(permission).depends_on.contains(&binding.identity));
        assert_eq!(graph.name_of(permission), "addTodoPermission");
    }

    #[test]
    fn test_authorizer_declares_pool_family() {
        let mut graph = ResourceGraph::new();
        let api = graph.declare("todoApi", NodeKind::RestApi { description: None });
        let mut provisioner = DeclaredProvisioner;

        let authorizer = provisioner
            .provision_authorizer(&mut graph, api, "todoapi-demo", "https://cdn.example")
            .expect("authorizer should provision");

        assert_eq!(graph.count("user_pool"), 1);
        assert_eq!(graph.count("user_pool_client"), 1);
        assert_eq!(graph.count("user_pool_domain"), 1);
        assert_eq!(graph.name_of(authorizer), "todoApiAuthorizer");
    }
}
