//! Validate phase - runs lints over the manifest.

use eyre::{Result, bail};
use gantry_manifest::{Manifest, Verb};

use crate::pipeline::{CompileContext, Diagnostic, Phase};

/// Name and description of a lint, for `gantry explain`.
#[derive(Debug, Clone)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A lint that checks the manifest for cross-descriptor issues.
///
/// Per-descriptor schema validation already happened at parse time; lints
/// see the whole route set at once.
pub trait Lint: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the manifest and record any findings.
    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>);
}

/// Phase that validates the manifest using configurable lints.
///
/// The phase fails if any lint records an error, aborting the whole run
/// before anything is assembled. Warnings pass through.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a validate phase with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(RouteTopologyLint),
                Box::new(AuthProviderLint),
                Box::new(RedirectTargetLint),
                Box::new(CorsPreflightLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Names and descriptions of the configured lints.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints
            .iter()
            .map(|l| LintInfo {
                name: l.name(),
                description: l.description(),
            })
            .collect()
    }

    /// Run every lint, recording diagnostics without failing.
    ///
    /// `gantry check` uses this directly so it can list all errors instead
    /// of stopping at the first.
    pub fn check_into(&self, ctx: &mut CompileContext) {
        for lint in &self.lints {
            lint.check(&ctx.manifest, &mut ctx.diagnostics);
        }
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Lint the route surface for topology and auth issues"
    }

    fn run(&self, ctx: &mut CompileContext) -> Result<()> {
        self.check_into(ctx);

        if ctx.has_errors() {
            bail!("validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

// ============================================================================
// Built-in lints
// ============================================================================

/// Every non-root path's parent path must be present in the route set.
///
/// The tree builder resolves parents by dropping the last path segment; a
/// hole in the path set would make resource creation fail halfway through.
pub struct RouteTopologyLint;

impl Lint for RouteTopologyLint {
    fn name(&self) -> &'static str {
        "route-topology"
    }

    fn description(&self) -> &'static str {
        "Every nested path's parent must be declared"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        for path in manifest.routes.keys() {
            let Some(idx) = path.rfind('/') else { continue };
            if idx == 0 {
                // Single-segment path: attaches under the API root.
                continue;
            }
            let parent = &path[..idx];
            if !manifest.routes.contains_key(parent) {
                diagnostics.push(
                    Diagnostic::error(
                        self.name(),
                        format!("route '{path}' has no parent: expected '{parent}' in the route set"),
                    )
                    .at(format!("routes.\"{path}\"")),
                );
            }
        }
    }
}

/// Authenticated methods need an [auth] section to build the authorizer from.
pub struct AuthProviderLint;

impl Lint for AuthProviderLint {
    fn name(&self) -> &'static str {
        "auth-provider"
    }

    fn description(&self) -> &'static str {
        "Authenticated methods require an [auth] section"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        if manifest.auth.is_some() || !manifest.has_authenticated() {
            return;
        }
        for (path, route) in &manifest.routes {
            for (verb, func) in &route.methods {
                if func.is_authenticated() {
                    diagnostics.push(
                        Diagnostic::error(
                            self.name(),
                            format!(
                                "{verb} on '{path}' is authenticated but there is no [auth] section"
                            ),
                        )
                        .at(format!("routes.\"{path}\".methods.{verb}")),
                    );
                }
            }
        }
    }
}

/// An [auth] section needs somewhere to send sign-ins back to.
pub struct RedirectTargetLint;

impl Lint for RedirectTargetLint {
    fn name(&self) -> &'static str {
        "redirect-target"
    }

    fn description(&self) -> &'static str {
        "[auth] needs redirect_url or a [site] to default from"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let Some(auth) = &manifest.auth else { return };
        if auth.redirect_url.is_none() && manifest.site.is_none() {
            diagnostics.push(
                Diagnostic::error(
                    self.name(),
                    "[auth] has no redirect target: set auth.redirect_url or add a [site]",
                )
                .at("auth"),
            );
        }
    }
}

/// When a site is configured, routes reached from the browser need an
/// OPTIONS mock or cross-origin preflight will fail.
pub struct CorsPreflightLint;

impl Lint for CorsPreflightLint {
    fn name(&self) -> &'static str {
        "cors-preflight"
    }

    fn description(&self) -> &'static str {
        "Routes called from the site should carry an OPTIONS mock"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        if manifest.site.is_none() {
            return;
        }
        for (path, route) in &manifest.routes {
            let has_backend = route.methods.values().any(|f| !f.integration.is_mock());
            let has_preflight = route.methods.contains_key(&Verb::OPTIONS);
            if has_backend && !has_preflight {
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        format!("route '{path}' has no OPTIONS mock; the site cannot preflight it"),
                    )
                    .at(format!("routes.\"{path}\"")),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn parse_manifest(content: &str) -> Manifest {
        Manifest::from_str(content).expect("manifest should parse")
    }

    #[test]
    fn test_topology_lint_flags_missing_parent() {
        let manifest = parse_manifest(
            r#"
            [gateway]
            name = "api"

            [routes."/item/{id}"]
            [routes."/item/{id}".methods.GET]
            name = "getTodo"
            handler = "app.getTodo"
            auth = "none"
        "#,
        );

        let mut diagnostics = Vec::new();
        RouteTopologyLint.check(&manifest, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert!(diagnostics[0].message.contains("'/item'"));
    }

    #[test]
    fn test_topology_lint_accepts_closed_path_set() {
        let manifest = parse_manifest(
            r#"
            [gateway]
            name = "api"

            [routes."/item"]
            [routes."/item/{id}"]
            [routes."/item/{id}/done"]
        "#,
        );

        let mut diagnostics = Vec::new();
        RouteTopologyLint.check(&manifest, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_auth_provider_lint() {
        let manifest = parse_manifest(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.GET]
            name = "getAllTodo"
            handler = "app.getAllTodo"
        "#,
        );

        let mut diagnostics = Vec::new();
        AuthProviderLint.check(&manifest, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
    }

    #[test]
    fn test_redirect_target_lint() {
        let manifest = parse_manifest(
            r#"
            [gateway]
            name = "api"

            [auth]
            domain = "api-demo"
        "#,
        );

        let mut diagnostics = Vec::new();
        RedirectTargetLint.check(&manifest, &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);

        let manifest = parse_manifest(
            r#"
            [gateway]
            name = "api"

            [auth]
            domain = "api-demo"

            [site]
        "#,
        );
        let mut diagnostics = Vec::new();
        RedirectTargetLint.check(&manifest, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_cors_preflight_lint_warns_without_options_mock() {
        let manifest = parse_manifest(
            r#"
            [gateway]
            name = "api"

            [site]

            [routes."/item".methods.GET]
            name = "getAllTodo"
            handler = "app.getAllTodo"
            auth = "none"
        "#,
        );

        let mut diagnostics = Vec::new();
        CorsPreflightLint.check(&manifest, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
    }

    #[test]
    fn test_validate_phase_fails_on_errors() {
        let manifest = parse_manifest(
            r#"
            [gateway]
            name = "api"

            [routes."/item/{id}".methods.GET]
            name = "getTodo"
            handler = "app.getTodo"
            auth = "none"
        "#,
        );

        let mut ctx = CompileContext::new(manifest);
        let result = ValidatePhase::new().run(&mut ctx);

        assert!(result.is_err());
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_validate_phase_passes_warnings_through() {
        let manifest = parse_manifest(
            r#"
            [gateway]
            name = "api"

            [site]

            [routes."/item".methods.GET]
            name = "getAllTodo"
            handler = "app.getAllTodo"
            auth = "none"
        "#,
        );

        let mut ctx = CompileContext::new(manifest);
        ValidatePhase::new()
            .run(&mut ctx)
            .expect("warnings do not fail the phase");
        assert!(ctx.has_warnings());
    }
}
