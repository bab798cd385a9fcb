use serde::Deserialize;

/// Gateway metadata configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Name of the API; prefixes every derived resource name
    pub name: String,

    /// Published stage name
    #[serde(default = "default_stage")]
    pub stage: String,

    /// Description for the rest-api resource
    pub description: Option<String>,

    /// Convention root for backend artifact directories
    #[serde(default = "default_backend_src")]
    pub backend_src: String,
}

fn default_stage() -> String {
    "demo".to_string()
}

fn default_backend_src() -> String {
    "./backend".to_string()
}

/// Identity provider configuration for the shared authorizer
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Hosted identity-pool domain prefix
    pub domain: String,

    /// Sign-in redirect target; defaults to the site URL when a [site]
    /// section exists
    pub redirect_url: Option<String>,
}

/// Storage table provisioned alongside the API
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub hash_key: String,
    pub range_key: Option<String>,

    /// Environment variable through which bound functions receive the
    /// table name
    #[serde(default = "default_table_env_var")]
    pub env_var: String,
}

fn default_table_env_var() -> String {
    "TABLE_NAME".to_string()
}

/// Static frontend site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Directory of static assets to publish
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
}

fn default_source_dir() -> String {
    "./www".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_defaults() {
        let gateway: GatewayConfig = toml::from_str(
            r#"
            name = "todoApi"
        "#,
        )
        .expect("should parse");

        assert_eq!(gateway.stage, "demo");
        assert_eq!(gateway.backend_src, "./backend");
        assert!(gateway.description.is_none());
    }

    #[test]
    fn test_table_env_var_default() {
        let table: TableConfig = toml::from_str(
            r#"
            name = "todo-api"
            hash_key = "username"
        "#,
        )
        .expect("should parse");

        assert_eq!(table.env_var, "TABLE_NAME");
        assert!(table.range_key.is_none());
    }
}
