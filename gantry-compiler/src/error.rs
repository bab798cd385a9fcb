use gantry_ir::HttpMethod;
use thiserror::Error;

/// Errors raised while assembling a plan.
///
/// Every variant is a configuration defect: the build aborts, nothing is
/// retried, and no partial plan escapes to the caller.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A non-root path whose parent path is not in the route set.
    #[error("route '{path}' has no parent: expected '{parent}' in the route set")]
    MissingParent { path: String, parent: String },

    /// A route reached the wirer without a resource node, which means the
    /// tree pass never ran or was given a different surface.
    #[error("route '{path}' was never built into the resource tree")]
    UnbuiltRoute { path: String },

    /// A function was bound twice. Bindings are written exactly once.
    #[error("function '{name}' is already bound to a backend")]
    AlreadyBound { name: String },

    /// A non-mock function with no resolvable backend reference.
    #[error("function '{name}' has no handler to bind")]
    MissingHandler { name: String },

    /// An authenticated method was wired but no authorizer exists.
    #[error("{verb} on '{path}' is authenticated but no authorizer was built")]
    MissingAuthorizer { path: String, verb: HttpMethod },

    /// Authenticated methods declared without an [auth] section.
    #[error("authenticated methods declared but no [auth] provider is configured")]
    MissingAuthConfig,

    /// An [auth] section with nowhere to send sign-ins back to.
    #[error("[auth] has no redirect target: set auth.redirect_url or add a [site]")]
    MissingRedirect,

    /// The provisioning substrate rejected a resource declaration.
    #[error("substrate rejected '{resource}': {message}")]
    Substrate { resource: String, message: String },
}
