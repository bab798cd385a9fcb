//! Lower phase - transforms the manifest into the API surface IR.
//!
//! Lowering applies every deterministic default (artifact paths, derived
//! logical names, allowed-invocation patterns, descriptions) and orders
//! routes by path depth, so the assembler never needs the manifest again.

use eyre::Result;
use gantry_ir::{
    ApiMeta, ApiSurface, AuthSpec, Authorization, HttpMethod, IntegrationKind, RouteFunction,
    RouteNode, SiteSpec, TableSpec,
};
use gantry_manifest::{AuthMode, FunctionConfig, Integration, Manifest, RouteConfig, Verb};

use crate::pipeline::{CompileContext, Phase};

/// Phase that lowers the manifest to an [`ApiSurface`].
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Apply defaults and order routes by path depth"
    }

    fn run(&self, ctx: &mut CompileContext) -> Result<()> {
        ctx.surface = Some(lower_manifest(&ctx.manifest));
        Ok(())
    }
}

/// Lower a manifest into an API surface.
pub fn lower_manifest(manifest: &Manifest) -> ApiSurface {
    let gateway = &manifest.gateway;

    let mut routes: Vec<RouteNode> = manifest
        .routes
        .iter()
        .map(|(path, route)| lower_route(path, route, gateway))
        .collect();
    // Stable sort: declaration order is preserved within a depth, and
    // parents always precede children regardless of declaration order.
    routes.sort_by_key(|r| r.depth);

    ApiSurface {
        meta: ApiMeta {
            name: gateway.name.clone(),
            stage: gateway.stage.clone(),
            description: gateway.description.clone(),
            backend_src: gateway.backend_src.clone(),
        },
        auth: manifest.auth.as_ref().map(|a| AuthSpec {
            domain: a.domain.clone(),
            redirect_url: a.redirect_url.clone(),
        }),
        table: manifest.table.as_ref().map(|t| TableSpec {
            name: t.name.clone(),
            hash_key: t.hash_key.clone(),
            range_key: t.range_key.clone(),
            env_var: t.env_var.clone(),
        }),
        site: manifest.site.as_ref().map(|s| SiteSpec {
            source_dir: s.source_dir.clone(),
        }),
        routes,
    }
}

fn lower_route(
    path: &str,
    route: &RouteConfig,
    gateway: &gantry_manifest::GatewayConfig,
) -> RouteNode {
    let name = route.logical_name(path);
    let depth = path.split('/').filter(|s| !s.is_empty()).count();
    let methods = route
        .methods
        .iter()
        .map(|(verb, func)| (lower_verb(*verb), lower_function(*verb, func, path, &name, gateway)))
        .collect();

    RouteNode {
        description: route.description.clone().unwrap_or_else(|| name.clone()),
        name,
        path: path.to_string(),
        depth,
        methods,
    }
}

fn lower_function(
    verb: Verb,
    func: &FunctionConfig,
    path: &str,
    route_name: &str,
    gateway: &gantry_manifest::GatewayConfig,
) -> RouteFunction {
    let name = func
        .logical_name(route_name)
        .unwrap_or_else(|| format!("{route_name}{verb}"));

    let integration = match func.integration {
        Integration::Proxy => IntegrationKind::Proxy,
        Integration::Mock => IntegrationKind::Mock,
        Integration::Http => IntegrationKind::Custom { kind: "HTTP".into() },
        Integration::Aws => IntegrationKind::Custom { kind: "AWS".into() },
    };

    let filename = if integration.is_mock() {
        None
    } else {
        Some(
            func.filename
                .clone()
                .unwrap_or_else(|| artifact_path(&gateway.backend_src, &name)),
        )
    };

    let integration_verb = match &integration {
        // The backend contract is POST whatever the route's verb is.
        IntegrationKind::Proxy => HttpMethod::Post,
        IntegrationKind::Mock => lower_verb(verb),
        IntegrationKind::Custom { .. } => func
            .integration_verb
            .map(lower_verb)
            .unwrap_or(HttpMethod::Post),
    };

    RouteFunction {
        handler: func.handler.clone(),
        filename,
        authorization: lower_auth(func.resolved_auth()),
        allowed_path: func.resolved_allowed_path(verb, path),
        runtime: func.runtime.clone(),
        timeout: func.timeout,
        environment: func
            .env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        description: func.description.clone().unwrap_or_else(|| name.clone()),
        name,
        integration,
        integration_verb,
    }
}

fn artifact_path(backend_src: &str, name: &str) -> String {
    format!("{}/{}", backend_src.trim_end_matches('/'), name)
}

fn lower_verb(verb: Verb) -> HttpMethod {
    match verb {
        Verb::GET => HttpMethod::Get,
        Verb::POST => HttpMethod::Post,
        Verb::PUT => HttpMethod::Put,
        Verb::DELETE => HttpMethod::Delete,
        Verb::PATCH => HttpMethod::Patch,
        Verb::HEAD => HttpMethod::Head,
        Verb::OPTIONS => HttpMethod::Options,
    }
}

fn lower_auth(mode: AuthMode) -> Authorization {
    match mode {
        AuthMode::None => Authorization::None,
        AuthMode::Authenticated => Authorization::Authenticated,
    }
}
