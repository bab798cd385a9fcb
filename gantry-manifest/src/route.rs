use indexmap::IndexMap;
use serde::Deserialize;

/// HTTP verb key of a method table.
///
/// Unknown verbs are rejected at parse time with a spanned toml error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Verb {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

impl Verb {
    /// The verb as it appears on the wire (and in the manifest).
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::GET => "GET",
            Verb::POST => "POST",
            Verb::PUT => "PUT",
            Verb::DELETE => "DELETE",
            Verb::PATCH => "PATCH",
            Verb::HEAD => "HEAD",
            Verb::OPTIONS => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization mode of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    None,
    Authenticated,
}

/// Integration kind of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Integration {
    /// Proxy to a bound backend function
    #[default]
    Proxy,
    /// Terminate locally with a canned response
    Mock,
    /// HTTP passthrough to a declared URI
    Http,
    /// Direct substrate-service call to a declared URI
    Aws,
}

impl Integration {
    /// Returns true for mock integrations
    pub fn is_mock(&self) -> bool {
        matches!(self, Integration::Mock)
    }

    /// Returns true for integrations that bind a backend function
    pub fn needs_handler(&self) -> bool {
        !self.is_mock()
    }

    /// Returns true for custom passthrough integrations
    pub fn is_custom(&self) -> bool {
        matches!(self, Integration::Http | Integration::Aws)
    }
}

/// One route entry: a path with its method table
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// Logical name; defaults to a camel-cased form of the path segments
    pub name: Option<String>,

    /// Description; defaults to the logical name
    pub description: Option<String>,

    /// HTTP method → function binding, declaration-ordered
    #[serde(default)]
    pub methods: IndexMap<Verb, FunctionConfig>,
}

impl RouteConfig {
    /// The route's logical name, explicit or derived from the path
    pub fn logical_name(&self, path: &str) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| logical_name_for_path(path))
    }
}

/// One backend binding declared under a route's method table
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionConfig {
    /// Logical name, unique across the manifest; required unless mock
    pub name: Option<String>,

    /// Entry-point identifier; required unless mock
    pub handler: Option<String>,

    /// Source-artifact directory; defaults to `<backend_src>/<name>`
    pub filename: Option<String>,

    /// Authorization mode; defaults to "authenticated", except for mocks
    /// which are always "none"
    pub auth: Option<AuthMode>,

    /// Invoke-permission scope; defaults to `*/<VERB>/<path with {param} → *>`
    pub allowed_path: Option<String>,

    /// Runtime tag for the compute provisioner
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Invocation timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u32,

    /// Environment mapping, declaration-ordered
    #[serde(default)]
    pub env: IndexMap<String, String>,

    /// Description passed to the compute provisioner
    pub description: Option<String>,

    /// Integration kind
    #[serde(default)]
    pub integration: Integration,

    /// Backend-facing verb for http/aws integrations; proxy integrations
    /// always use POST
    pub integration_verb: Option<Verb>,
}

fn default_runtime() -> String {
    "nodejs16.x".to_string()
}

fn default_timeout() -> u32 {
    30
}

impl FunctionConfig {
    /// The function's logical name, explicit or derived.
    ///
    /// Mocks default to `mock<RouteName>`; everything else must declare a
    /// name (enforced by validation).
    pub fn logical_name(&self, route_name: &str) -> Option<String> {
        if let Some(name) = &self.name {
            return Some(name.clone());
        }
        if self.integration.is_mock() {
            return Some(format!("mock{}", capitalize(route_name)));
        }
        None
    }

    /// The effective authorization mode.
    ///
    /// Non-mock methods are authenticated unless they opt out; mocks are
    /// always unauthenticated.
    pub fn resolved_auth(&self) -> AuthMode {
        if self.integration.is_mock() {
            return AuthMode::None;
        }
        self.auth.unwrap_or(AuthMode::Authenticated)
    }

    /// Returns true if this method requires the shared authorizer
    pub fn is_authenticated(&self) -> bool {
        self.resolved_auth() == AuthMode::Authenticated
    }

    /// The allowed-invocation pattern, explicit or derived from the verb
    /// and path with `{param}` segments widened to `*`
    pub fn resolved_allowed_path(&self, verb: Verb, path: &str) -> String {
        if let Some(pattern) = &self.allowed_path {
            return pattern.clone();
        }
        let widened: Vec<&str> = path
            .split('/')
            .skip(1)
            .map(|seg| {
                if seg.starts_with('{') {
                    "*"
                } else {
                    seg
                }
            })
            .collect();
        format!("*/{}/{}", verb, widened.join("/"))
    }
}

/// Derive a route's logical name from its path: segments are camel-joined
/// with `{param}` braces stripped, e.g. `/item/{id}/done` → `itemIdDone`.
pub fn logical_name_for_path(path: &str) -> String {
    let mut name = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let bare = segment.trim_matches(|c| c == '{' || c == '}');
        if name.is_empty() {
            name.push_str(bare);
        } else {
            name.push_str(&capitalize(bare));
        }
    }
    name
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
