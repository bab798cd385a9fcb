//! The lowered API surface.
//!
//! An [`ApiSurface`] is the manifest after defaulting and ordering: routes
//! sorted by path depth (declaration order within a depth), every derived
//! field resolved. The plan assembler consumes it read-only.

use serde::Serialize;

use crate::{Authorization, HttpMethod, IntegrationKind};

/// The complete desired API surface.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSurface {
    /// Gateway metadata.
    pub meta: ApiMeta,
    /// Identity provider configuration, when any method is authenticated.
    pub auth: Option<AuthSpec>,
    /// Storage table provisioned alongside the API.
    pub table: Option<TableSpec>,
    /// Static frontend site provisioned alongside the API.
    pub site: Option<SiteSpec>,
    /// Route nodes in dependency order: parents always precede children.
    pub routes: Vec<RouteNode>,
}

impl ApiSurface {
    /// Returns true if any method on any route requires the authorizer.
    pub fn has_authenticated(&self) -> bool {
        self.routes
            .iter()
            .flat_map(|r| r.methods.iter())
            .any(|(_, f)| f.authorization.requires_authorizer())
    }

    /// Look up a route by its full path.
    pub fn route(&self, path: &str) -> Option<&RouteNode> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Total number of (path, method) pairs.
    pub fn method_count(&self) -> usize {
        self.routes.iter().map(|r| r.methods.len()).sum()
    }
}

/// Gateway metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMeta {
    /// Gateway name; prefixes every derived resource name.
    pub name: String,
    /// Stage name published for the deployment.
    pub stage: String,
    /// Human description.
    pub description: Option<String>,
    /// Convention root for backend artifact directories.
    pub backend_src: String,
}

/// Identity provider configuration for the shared authorizer.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSpec {
    /// Hosted identity-pool domain prefix.
    pub domain: String,
    /// Sign-in redirect target. When absent, the site URL is used.
    pub redirect_url: Option<String>,
}

/// Storage table provisioned at the orchestrator level.
#[derive(Debug, Clone, Serialize)]
pub struct TableSpec {
    pub name: String,
    pub hash_key: String,
    pub range_key: Option<String>,
    /// Environment variable carrying the table name into every bound
    /// backend function.
    pub env_var: String,
}

/// Static frontend site provisioned at the orchestrator level.
#[derive(Debug, Clone, Serialize)]
pub struct SiteSpec {
    /// Directory of static assets to publish.
    pub source_dir: String,
}

/// One path in the API namespace.
#[derive(Debug, Clone, Serialize)]
pub struct RouteNode {
    /// Logical name, unique across the surface (e.g. "itemIdDone").
    pub name: String,
    /// Full path string (e.g. "/item/{id}/done").
    pub path: String,
    /// Number of path segments; roots have depth 1.
    pub depth: usize,
    /// Human description; defaults to the logical name.
    pub description: String,
    /// Methods on this path, declaration-ordered, verbs unique.
    pub methods: Vec<(HttpMethod, RouteFunction)>,
}

impl RouteNode {
    /// Returns true if this route attaches directly under the API root.
    pub fn is_root(&self) -> bool {
        self.depth == 1
    }

    /// The last path segment, used as the gateway resource's leaf name.
    pub fn path_part(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }

    /// The parent path, computed by dropping the last segment.
    ///
    /// Returns `None` for root routes, which attach under the API root
    /// resource instead of another route.
    pub fn parent_path(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.path.rfind('/').map(|idx| &self.path[..idx])
    }
}

/// One backend binding for a single method on a single path.
#[derive(Debug, Clone, Serialize)]
pub struct RouteFunction {
    /// Logical name, unique across the surface.
    pub name: String,
    /// Entry-point identifier (e.g. "app.getAllTodo"). Absent for mocks.
    pub handler: Option<String>,
    /// Source-artifact directory. Absent for mocks; otherwise defaulted
    /// from the backend convention root and the logical name.
    pub filename: Option<String>,
    /// Authorization mode; always [`Authorization::None`] for mocks.
    pub authorization: Authorization,
    /// Wildcard pattern scoping the invoke-permission grant,
    /// e.g. `*/GET/item/*`.
    pub allowed_path: String,
    /// Runtime tag for the compute provisioner.
    pub runtime: String,
    /// Invocation timeout in seconds.
    pub timeout: u32,
    /// Environment mapping, declaration-ordered, keys unique.
    pub environment: Vec<(String, String)>,
    /// Human description.
    pub description: String,
    /// How the method reaches its backend.
    pub integration: IntegrationKind,
    /// Backend-facing verb. Always POST for proxy integrations.
    pub integration_verb: HttpMethod,
}

impl RouteFunction {
    /// Returns true if this function terminates locally as a mock.
    pub fn is_mock(&self) -> bool {
        self.integration.is_mock()
    }
}
