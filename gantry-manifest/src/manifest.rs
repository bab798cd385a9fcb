use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    AuthConfig, Error, GatewayConfig, Result, RouteConfig, SiteConfig, TableConfig,
    validate::ParseContext,
};

/// Root manifest for gantry.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Gateway metadata
    pub gateway: GatewayConfig,

    /// Identity provider for authenticated methods
    pub auth: Option<AuthConfig>,

    /// Storage table provisioned alongside the API
    pub table: Option<TableConfig>,

    /// Static frontend site provisioned alongside the API
    pub site: Option<SiteConfig>,

    /// Route surface, keyed by path, declaration-ordered
    #[serde(default)]
    pub routes: IndexMap<String, RouteConfig>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "gantry.toml")
    }
}

impl Manifest {
    /// Parse a gantry.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a gantry.toml from a string with a custom filename for error
    /// reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        manifest.validate(content, filename)?;
        Ok(manifest)
    }

    /// Total number of declared (path, method) pairs
    pub fn method_count(&self) -> usize {
        self.routes.values().map(|r| r.methods.len()).sum()
    }

    /// Returns true if any method requires the shared authorizer.
    ///
    /// A method is authenticated when it says so explicitly, or when it is a
    /// non-mock method relying on the authenticated-by-default rule.
    pub fn has_authenticated(&self) -> bool {
        self.routes
            .values()
            .flat_map(|r| r.methods.values())
            .any(|f| f.is_authenticated())
    }

    /// Validate the manifest after parsing.
    ///
    /// Schema errors abort immediately: an invalid surface must never reach
    /// the assembler.
    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        let ctx = ParseContext::new(src, filename);

        let mut route_names: IndexMap<String, ()> = IndexMap::new();
        let mut function_names: IndexMap<String, ()> = IndexMap::new();

        for (path, route) in &self.routes {
            ctx.validate_path(path)?;

            let route_name = route.logical_name(path);
            check_unique(&ctx, &mut route_names, &route_name)?;

            for (verb, func) in &route.methods {
                let method_span = ctx.find_method_span(path, verb.as_str());

                if func.integration.is_mock() {
                    if func.auth == Some(crate::AuthMode::Authenticated) {
                        return Err(Error::mock_authorization(
                            path.clone(),
                            verb.as_str(),
                            src,
                            filename,
                            method_span,
                        ));
                    }
                    if func.handler.is_some() {
                        return Err(Error::validation(
                            format!("mock {verb} on '{path}' must not declare a handler"),
                            src,
                            filename,
                            method_span,
                        ));
                    }
                } else {
                    if func.handler.is_none() {
                        return Err(Error::missing_handler(
                            path.clone(),
                            verb.as_str(),
                            src,
                            filename,
                            method_span,
                        ));
                    }
                    if func.name.is_none() {
                        return Err(Error::validation(
                            format!("{verb} on '{path}' requires a logical name"),
                            src,
                            filename,
                            method_span,
                        ));
                    }
                }

                if let Some(name) = func.logical_name(&route_name) {
                    check_unique(&ctx, &mut function_names, &name)?;
                }
            }
        }

        Ok(())
    }
}

/// Record a logical name, failing with both declaration sites labeled when
/// it was already taken.
fn check_unique(
    ctx: &ParseContext<'_>,
    seen: &mut IndexMap<String, ()>,
    name: &str,
) -> Result<()> {
    if seen.contains_key(name) {
        return Err(Error::duplicate_name(
            name,
            ctx.src(),
            ctx.filename(),
            ctx.find_nth_span(name, 0),
            ctx.find_nth_span(name, 1),
        ));
    }
    seen.insert(name.to_string(), ());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODO_MANIFEST: &str = r#"
        [gateway]
        name = "todoApi"
        stage = "demo"

        [auth]
        domain = "todoapi-demo"

        [routes."/item"]
        [routes."/item".methods.GET]
        name = "getAllTodo"
        handler = "app.getAllTodo"

        [routes."/item".methods.POST]
        name = "addTodo"
        handler = "app.addToDoItem"

        [routes."/item".methods.OPTIONS]
        integration = "mock"

        [routes."/item/{id}"]
        [routes."/item/{id}".methods.GET]
        name = "getTodo"
        handler = "app.getTodo"
    "#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::from_str(TODO_MANIFEST).expect("manifest should parse");

        assert_eq!(manifest.gateway.name, "todoApi");
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.method_count(), 4);
        assert!(manifest.has_authenticated());
    }

    #[test]
    fn test_routes_keep_declaration_order() {
        let manifest = Manifest::from_str(TODO_MANIFEST).expect("manifest should parse");
        let paths: Vec<&str> = manifest.routes.keys().map(String::as_str).collect();
        assert_eq!(paths, ["/item", "/item/{id}"]);
    }

    #[test]
    fn test_missing_handler_rejected() {
        let err = Manifest::from_str(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.GET]
            name = "getAll"
        "#,
        )
        .expect_err("handler is required");
        assert!(matches!(*err, Error::MissingHandler { .. }));
    }

    #[test]
    fn test_mock_with_auth_rejected() {
        let err = Manifest::from_str(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.OPTIONS]
            integration = "mock"
            auth = "authenticated"
        "#,
        )
        .expect_err("mock must not be authenticated");
        assert!(matches!(*err, Error::MockAuthorization { .. }));
    }

    #[test]
    fn test_mock_with_handler_rejected() {
        let err = Manifest::from_str(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.OPTIONS]
            integration = "mock"
            handler = "app.never"
        "#,
        )
        .expect_err("mock must not declare a handler");
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_duplicate_function_name_rejected() {
        let err = Manifest::from_str(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.GET]
            name = "getTodo"
            handler = "app.getAll"

            [routes."/item".methods.POST]
            name = "getTodo"
            handler = "app.add"
        "#,
        )
        .expect_err("duplicate names are rejected");
        assert!(matches!(*err, Error::DuplicateName { .. }));
    }

    #[test]
    fn test_invalid_path_rejected() {
        let err = Manifest::from_str(
            r#"
            [gateway]
            name = "api"

            [routes."item/"]
        "#,
        )
        .expect_err("path must start with '/'");
        assert!(matches!(*err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_unknown_verb_is_a_parse_error() {
        let err = Manifest::from_str(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.FETCH]
            name = "fetchAll"
            handler = "app.fetchAll"
        "#,
        )
        .expect_err("FETCH is not a recognized verb");
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gantry.toml");
        std::fs::write(&path, TODO_MANIFEST).expect("write manifest");

        let manifest = Manifest::from_file(&path).expect("manifest should parse");
        assert_eq!(manifest.gateway.name, "todoApi");

        let err = Manifest::from_file(dir.path().join("missing.toml"))
            .expect_err("missing file is an Io error");
        assert!(matches!(*err, Error::Io { .. }));
    }
}
