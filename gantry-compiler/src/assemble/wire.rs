//! Method and integration wiring.
//!
//! Per (route, method): a method node carrying the authorization mode, and
//! an integration node wired per the integration kind. Mock integrations
//! terminate locally, so they additionally get a paired 200
//! method-response/integration-response carrying permissive cross-origin
//! headers: the preflight must succeed without a backend round-trip.

use std::collections::BTreeMap;

use gantry_ir::{ApiSurface, HttpMethod, IntegrationKind, RouteFunction, RouteNode};

use super::binder;
use super::context::BuildContext;
use crate::CompileError;
use crate::graph::{IntegrationSpec, NodeId, NodeKind};
use crate::provision::Provisioner;

const MOCK_REQUEST_TEMPLATE: &str = r#"{"statusCode": 200}"#;

const CORS_HEADERS: [&str; 3] = [
    "method.response.header.Access-Control-Allow-Headers",
    "method.response.header.Access-Control-Allow-Methods",
    "method.response.header.Access-Control-Allow-Origin",
];

const CORS_ALLOW_HEADERS: &str =
    "'Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token'";
const CORS_ALLOW_METHODS: &str = "'DELETE,GET,HEAD,OPTIONS,PATCH,POST,PUT'";
const CORS_ALLOW_ORIGIN: &str = "'*'";

/// Wire every (route, method) pair into the graph.
pub(crate) fn wire<P: Provisioner>(
    surface: &ApiSurface,
    api: NodeId,
    authorizer: Option<NodeId>,
    provisioner: &mut P,
    ctx: &mut BuildContext,
    env_overrides: &BTreeMap<String, String>,
    policies: &[String],
) -> Result<(), CompileError> {
    for route in &surface.routes {
        let resource = ctx.resources.get(&route.path).copied().ok_or_else(|| {
            CompileError::UnbuiltRoute {
                path: route.path.clone(),
            }
        })?;

        for (verb, function) in &route.methods {
            wire_method(
                route,
                *verb,
                function,
                api,
                resource,
                authorizer,
                provisioner,
                ctx,
                env_overrides,
                policies,
            )?;
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn wire_method<P: Provisioner>(
    route: &RouteNode,
    verb: HttpMethod,
    function: &RouteFunction,
    api: NodeId,
    resource: NodeId,
    authorizer: Option<NodeId>,
    provisioner: &mut P,
    ctx: &mut BuildContext,
    env_overrides: &BTreeMap<String, String>,
    policies: &[String],
) -> Result<(), CompileError> {
    // The integration needs the invocation handle, so bind first.
    let binding = if function.integration.needs_binding() {
        Some(binder::bind(
            function,
            api,
            provisioner,
            ctx,
            env_overrides,
            policies,
        )?)
    } else {
        None
    };

    let authorizer_ref = if function.authorization.requires_authorizer() {
        Some(authorizer.ok_or_else(|| CompileError::MissingAuthorizer {
            path: route.path.clone(),
            verb,
        })?)
    } else {
        None
    };

    let mut method_deps = vec![api, resource];
    if let Some(auth) = authorizer_ref {
        method_deps.push(auth);
    }
    let method = ctx.graph.declare_with_deps(
        format!("{}{}", route.name, verb),
        NodeKind::Method {
            rest_api: api,
            resource,
            http_method: verb,
            authorization: function.authorization,
            authorizer: authorizer_ref,
        },
        method_deps,
    );
    ctx.deploy_deps.push(method);

    let mut integration_deps = vec![api, resource, method];
    let spec = match &function.integration {
        IntegrationKind::Proxy => {
            let binding = binding.as_ref().ok_or_else(|| CompileError::MissingHandler {
                name: function.name.clone(),
            })?;
            integration_deps.push(binding.identity);
            IntegrationSpec::Proxy {
                // The backend contract is POST whatever the route's verb is.
                verb: HttpMethod::Post,
                target: binding.invoke.clone(),
            }
        }
        IntegrationKind::Mock => IntegrationSpec::Mock {
            request_template: MOCK_REQUEST_TEMPLATE.to_string(),
        },
        IntegrationKind::Custom { kind } => {
            let binding = binding.as_ref().ok_or_else(|| CompileError::MissingHandler {
                name: function.name.clone(),
            })?;
            integration_deps.push(binding.identity);
            IntegrationSpec::Custom {
                kind: kind.clone(),
                verb: function.integration_verb,
                target: binding.invoke.clone(),
            }
        }
    };

    let integration = ctx.graph.declare_with_deps(
        format!("{}{}Integration", route.name, verb),
        NodeKind::Integration {
            rest_api: api,
            resource,
            http_method: verb,
            spec,
        },
        integration_deps,
    );
    ctx.deploy_deps.push(integration);

    if function.is_mock() {
        wire_cors_responses(route, verb, method, integration, ctx);
    }

    Ok(())
}

/// Pair a 200 method-response and integration-response declaring and
/// populating the three permissive CORS headers.
fn wire_cors_responses(
    route: &RouteNode,
    verb: HttpMethod,
    method: NodeId,
    integration: NodeId,
    ctx: &mut BuildContext,
) {
    let method_response = ctx.graph.declare_with_deps(
        format!("{}{}Response200", route.name, verb),
        NodeKind::MethodResponse {
            method,
            status_code: "200".to_string(),
            response_headers: CORS_HEADERS.iter().map(|h| h.to_string()).collect(),
        },
        vec![method],
    );
    ctx.deploy_deps.push(method_response);

    let mut header_values = BTreeMap::new();
    header_values.insert(CORS_HEADERS[0].to_string(), CORS_ALLOW_HEADERS.to_string());
    header_values.insert(CORS_HEADERS[1].to_string(), CORS_ALLOW_METHODS.to_string());
    header_values.insert(CORS_HEADERS[2].to_string(), CORS_ALLOW_ORIGIN.to_string());

    let integration_response = ctx.graph.declare_with_deps(
        format!("{}{}IntegrationResponse200", route.name, verb),
        NodeKind::IntegrationResponse {
            integration,
            status_code: "200".to_string(),
            response_headers: header_values,
        },
        vec![integration, method_response],
    );
    ctx.deploy_deps.push(integration_response);
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use gantry_manifest::Manifest;

    use super::*;
    use crate::assemble::tree;
    use crate::graph::ParentRef;
    use crate::provision::DeclaredProvisioner;

    fn wired_ctx(content: &str) -> BuildContext {
        let manifest = Manifest::from_str(content).expect("manifest should parse");
        let surface = crate::pipeline::phases::lower_manifest(&manifest);
        let mut ctx = BuildContext::new();
        let api = ctx
            .graph
            .declare("api", NodeKind::RestApi { description: None });
        tree::build(&surface, api, &mut ctx).expect("tree should build");
        let mut provisioner = DeclaredProvisioner;
        wire(
            &surface,
            api,
            None,
            &mut provisioner,
            &mut ctx,
            &BTreeMap::new(),
            &[],
        )
        .expect("wiring should succeed");
        ctx
    }

    #[test]
    fn test_proxy_integration_uses_post_backend_verb() {
        let ctx = wired_ctx(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.GET]
            name = "getAllTodo"
            handler = "app.getAllTodo"
            auth = "none"
        "#,
        );

        let integration = ctx
            .graph
            .nodes()
            .iter()
            .find(|n| n.kind.label() == "integration")
            .expect("integration exists");
        match &integration.kind {
            NodeKind::Integration { http_method, spec, .. } => {
                // The method keeps the route verb, the backend leg is POST.
                assert_eq!(*http_method, HttpMethod::Get);
                match spec {
                    IntegrationSpec::Proxy { verb, target } => {
                        assert_eq!(*verb, HttpMethod::Post);
                        assert_eq!(target.placeholder(), "${getAllTodo.invoke_arn}");
                    }
                    other => panic!("expected a proxy spec, got {other:?}"),
                }
            }
            other => panic!("expected an integration node, got {other:?}"),
        }
    }

    #[test]
    fn test_mock_skips_binding_and_pairs_cors_responses() {
        let ctx = wired_ctx(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.OPTIONS]
            integration = "mock"
        "#,
        );

        // No backend was bound.
        assert_eq!(ctx.graph.count("function"), 0);
        assert_eq!(ctx.graph.count("permission"), 0);
        assert!(ctx.bindings.is_empty());

        // The 200 response pair exists and carries all three CORS headers.
        assert_eq!(ctx.graph.count("method_response"), 1);
        assert_eq!(ctx.graph.count("integration_response"), 1);

        let response = ctx
            .graph
            .nodes()
            .iter()
            .find(|n| n.kind.label() == "integration_response")
            .expect("integration response exists");
        match &response.kind {
            NodeKind::IntegrationResponse { status_code, response_headers, .. } => {
                assert_eq!(status_code, "200");
                assert_eq!(response_headers.len(), 3);
                assert_eq!(
                    response_headers["method.response.header.Access-Control-Allow-Origin"],
                    "'*'"
                );
                let methods =
                    &response_headers["method.response.header.Access-Control-Allow-Methods"];
                for verb in HttpMethod::ALL {
                    assert!(methods.contains(verb.as_str()));
                }
            }
            other => panic!("expected an integration response, got {other:?}"),
        }
    }

    #[test]
    fn test_two_methods_two_integrations_two_bindings() {
        let ctx = wired_ctx(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.GET]
            name = "getAllTodo"
            handler = "app.getAllTodo"
            auth = "none"

            [routes."/item".methods.POST]
            name = "addTodo"
            handler = "app.addToDoItem"
            auth = "none"
        "#,
        );

        assert_eq!(ctx.graph.count("resource"), 1);
        assert_eq!(ctx.graph.count("method"), 2);
        assert_eq!(ctx.graph.count("integration"), 2);
        assert_eq!(ctx.graph.count("function"), 2);
        assert_eq!(ctx.bindings.len(), 2);

        // The root resource hangs off the API root.
        let resource = ctx
            .graph
            .nodes()
            .iter()
            .find(|n| n.kind.label() == "resource")
            .expect("resource exists");
        match &resource.kind {
            NodeKind::Resource { parent, path_part, .. } => {
                assert_eq!(*parent, ParentRef::Root);
                assert_eq!(path_part, "item");
            }
            other => panic!("expected a resource node, got {other:?}"),
        }
    }

    #[test]
    fn test_authenticated_method_without_authorizer_is_fatal() {
        let manifest = Manifest::from_str(
            r#"
            [gateway]
            name = "api"

            [auth]
            domain = "api-demo"
            redirect_url = "https://app.example"

            [routes."/item".methods.GET]
            name = "getAllTodo"
            handler = "app.getAllTodo"
        "#,
        )
        .expect("manifest should parse");
        let surface = crate::pipeline::phases::lower_manifest(&manifest);
        let mut ctx = BuildContext::new();
        let api = ctx
            .graph
            .declare("api", NodeKind::RestApi { description: None });
        tree::build(&surface, api, &mut ctx).expect("tree should build");

        let mut provisioner = DeclaredProvisioner;
        let err = wire(
            &surface,
            api,
            None,
            &mut provisioner,
            &mut ctx,
            &BTreeMap::new(),
            &[],
        )
        .expect_err("no authorizer to attach");
        assert!(matches!(err, CompileError::MissingAuthorizer { .. }));
    }

    #[test]
    fn test_methods_accumulate_into_deploy_deps() {
        let ctx = wired_ctx(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.GET]
            name = "getAllTodo"
            handler = "app.getAllTodo"
            auth = "none"

            [routes."/item".methods.OPTIONS]
            integration = "mock"
        "#,
        );

        // 1 resource + 2 methods + 2 integrations + 2 responses
        assert_eq!(ctx.deploy_deps.len(), 7);
    }
}
