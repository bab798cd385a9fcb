//! Shared enumerations of the API surface.

use serde::Serialize;

/// An HTTP verb recognized on a route method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Every recognized verb, in canonical order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Delete,
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Patch,
        HttpMethod::Post,
        HttpMethod::Put,
    ];

    /// The verb as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization mode carried by a method node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Authorization {
    /// No credential check; the method is publicly invocable.
    None,
    /// The method requires a token validated by the shared authorizer.
    Authenticated,
}

impl Authorization {
    /// Returns true if the method requires the shared authorizer.
    pub fn requires_authorizer(&self) -> bool {
        matches!(self, Authorization::Authenticated)
    }
}

impl std::fmt::Display for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authorization::None => f.write_str("NONE"),
            Authorization::Authenticated => f.write_str("AUTHENTICATED"),
        }
    }
}

/// How a method reaches its backend.
///
/// Each kind carries its own wiring data; the wirer dispatches on the
/// variant rather than branching on a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntegrationKind {
    /// Proxy the request to a bound backend function. The backend-facing
    /// verb is always POST, regardless of the route's own verb.
    Proxy,
    /// Terminate locally with a canned success response. No backend is
    /// bound and authorization is always [`Authorization::None`].
    Mock,
    /// Hand the request to the bound backend under a declared substrate
    /// integration type instead of the proxy contract.
    Custom {
        /// Substrate integration type (e.g. "HTTP", "AWS").
        kind: String,
    },
}

impl IntegrationKind {
    /// Returns true for mock integrations.
    pub fn is_mock(&self) -> bool {
        matches!(self, IntegrationKind::Mock)
    }

    /// Returns true for integrations that require a backend binding.
    /// Everything except a mock reaches a real backend.
    pub fn needs_binding(&self) -> bool {
        !self.is_mock()
    }
}
