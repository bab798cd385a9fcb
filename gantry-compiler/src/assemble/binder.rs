//! Backend binding.
//!
//! For each non-mock method the binder asks the compute provisioner for a
//! backend function and grants the gateway's execution context permission
//! to invoke it, scoped by the function's allowed-invocation pattern.

use std::collections::BTreeMap;

use gantry_ir::RouteFunction;

use super::context::BuildContext;
use crate::CompileError;
use crate::graph::NodeId;
use crate::provision::{Binding, ComputeSpec, Provisioner};

/// The principal the invoke grant is issued to.
const GATEWAY_PRINCIPAL: &str = "apigateway.amazonaws.com";

/// Bind one function to a backend and record the binding exactly once.
///
/// Mock functions never reach this point; re-binding the same name is a
/// caller error and aborts the build.
pub(crate) fn bind<P: Provisioner>(
    function: &RouteFunction,
    api: NodeId,
    provisioner: &mut P,
    ctx: &mut BuildContext,
    env_overrides: &BTreeMap<String, String>,
    policies: &[String],
) -> Result<Binding, CompileError> {
    if ctx.bindings.contains_key(&function.name) {
        return Err(CompileError::AlreadyBound {
            name: function.name.clone(),
        });
    }

    let handler = function
        .handler
        .as_deref()
        .ok_or_else(|| CompileError::MissingHandler {
            name: function.name.clone(),
        })?;
    let artifact = function
        .filename
        .as_deref()
        .ok_or_else(|| CompileError::MissingHandler {
            name: function.name.clone(),
        })?;

    // Merged environment; caller-supplied overrides win on key collision.
    let mut environment: BTreeMap<String, String> = function
        .environment
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    for (key, value) in env_overrides {
        environment.insert(key.clone(), value.clone());
    }

    let binding = provisioner.provision_compute(
        &mut ctx.graph,
        ComputeSpec {
            name: &function.name,
            artifact,
            runtime: &function.runtime,
            handler,
            timeout: function.timeout,
            environment,
            policies,
            description: &function.description,
        },
    )?;

    let execution_context = ctx.graph.output(api, "execution_arn");
    let source_pattern = format!(
        "{}/{}",
        execution_context.placeholder(),
        function.allowed_path
    );
    provisioner.grant_invoke(&mut ctx.graph, &binding, GATEWAY_PRINCIPAL, source_pattern)?;

    ctx.bindings
        .insert(function.name.clone(), binding.clone());
    Ok(binding)
}

#[cfg(test)]
mod tests {
    use gantry_ir::{Authorization, HttpMethod, IntegrationKind};

    use super::*;
    use crate::graph::NodeKind;
    use crate::provision::DeclaredProvisioner;

    fn make_function(name: &str) -> RouteFunction {
        RouteFunction {
            name: name.to_string(),
            handler: Some("app.getAllTodo".into()),
            filename: Some(format!("./backend/{name}")),
            authorization: Authorization::None,
            allowed_path: "*/GET/item".into(),
            runtime: "nodejs16.x".into(),
            timeout: 30,
            environment: vec![("CONNECTION_REUSE".into(), "1".into())],
            description: name.to_string(),
            integration: IntegrationKind::Proxy,
            integration_verb: HttpMethod::Post,
        }
    }

    fn make_ctx() -> (BuildContext, NodeId) {
        let mut ctx = BuildContext::new();
        let api = ctx
            .graph
            .declare("todoApi", NodeKind::RestApi { description: None });
        (ctx, api)
    }

    #[test]
    fn test_bind_creates_function_and_grant() {
        let (mut ctx, api) = make_ctx();
        let mut provisioner = DeclaredProvisioner;
        let function = make_function("getAllTodo");

        let binding = bind(
            &function,
            api,
            &mut provisioner,
            &mut ctx,
            &BTreeMap::new(),
            &[],
        )
        .expect("binding should succeed");

        assert_eq!(ctx.graph.count("function"), 1);
        assert_eq!(ctx.graph.count("permission"), 1);
        assert_eq!(binding.invoke.placeholder(), "${getAllTodo.invoke_arn}");
        assert!(ctx.bindings.contains_key("getAllTodo"));
    }

    #[test]
    fn test_grant_scoped_by_allowed_path() {
        let (mut ctx, api) = make_ctx();
        let mut provisioner = DeclaredProvisioner;
        let function = make_function("getAllTodo");

        bind(
            &function,
            api,
            &mut provisioner,
            &mut ctx,
            &BTreeMap::new(),
            &[],
        )
        .expect("binding should succeed");

        let permission = ctx
            .graph
            .nodes()
            .iter()
            .find(|n| n.kind.label() == "permission")
            .expect("permission exists");
        match &permission.kind {
            NodeKind::Permission { source_pattern, principal, .. } => {
                assert_eq!(
                    source_pattern,
                    "${todoApi.execution_arn}/*/GET/item"
                );
                assert_eq!(principal, GATEWAY_PRINCIPAL);
            }
            other => panic!("expected a permission node, got {other:?}"),
        }
    }

    #[test]
    fn test_env_overrides_win_on_collision() {
        let (mut ctx, api) = make_ctx();
        let mut provisioner = DeclaredProvisioner;
        let mut function = make_function("getAllTodo");
        function
            .environment
            .push(("TABLE_NAME".into(), "placeholder".into()));

        let mut overrides = BTreeMap::new();
        overrides.insert("TABLE_NAME".to_string(), "todo-api".to_string());

        bind(&function, api, &mut provisioner, &mut ctx, &overrides, &[])
            .expect("binding should succeed");

        let func_node = ctx
            .graph
            .nodes()
            .iter()
            .find(|n| n.kind.label() == "function")
            .expect("function exists");
        match &func_node.kind {
            NodeKind::Function { environment, .. } => {
                assert_eq!(environment["TABLE_NAME"], "todo-api");
                assert_eq!(environment["CONNECTION_REUSE"], "1");
            }
            other => panic!("expected a function node, got {other:?}"),
        }
    }

    #[test]
    fn test_rebinding_is_a_caller_error() {
        let (mut ctx, api) = make_ctx();
        let mut provisioner = DeclaredProvisioner;
        let function = make_function("getAllTodo");

        bind(
            &function,
            api,
            &mut provisioner,
            &mut ctx,
            &BTreeMap::new(),
            &[],
        )
        .expect("first binding succeeds");
        let err = bind(
            &function,
            api,
            &mut provisioner,
            &mut ctx,
            &BTreeMap::new(),
            &[],
        )
        .expect_err("second binding is rejected");

        assert!(matches!(err, CompileError::AlreadyBound { .. }));
    }

    #[test]
    fn test_missing_handler_is_fatal() {
        let (mut ctx, api) = make_ctx();
        let mut provisioner = DeclaredProvisioner;
        let mut function = make_function("broken");
        function.handler = None;

        let err = bind(
            &function,
            api,
            &mut provisioner,
            &mut ctx,
            &BTreeMap::new(),
            &[],
        )
        .expect_err("no handler to bind");
        assert!(matches!(err, CompileError::MissingHandler { .. }));
    }
}
