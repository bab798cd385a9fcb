//! Node types of the resource graph.

use std::collections::BTreeMap;

use gantry_ir::{Authorization, HttpMethod};
use serde::{Serialize, Serializer};

/// Identifier of a node in its graph: the insertion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The node's position in insertion order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An opaque reference to an attribute a node exposes only after the
/// substrate applies the plan (an invocation handle, an execution context,
/// a URL). Rendered as a `${owner.attribute}` placeholder wherever the
/// graph embeds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRef {
    node: NodeId,
    owner: String,
    attribute: String,
}

impl OutputRef {
    pub(crate) fn new(node: NodeId, owner: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            node,
            owner: owner.into(),
            attribute: attribute.into(),
        }
    }

    /// The node this reference points into.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The attribute name on the owning node.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The symbolic placeholder the substrate resolves at apply time.
    pub fn placeholder(&self) -> String {
        format!("${{{}.{}}}", self.owner, self.attribute)
    }
}

impl Serialize for OutputRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.placeholder())
    }
}

impl std::fmt::Display for OutputRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.placeholder())
    }
}

/// Where a gateway resource node attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentRef {
    /// The API's built-in root resource.
    Root,
    /// Another gateway resource node.
    Resource(NodeId),
}

/// Kind-specific wiring of an integration node.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntegrationSpec {
    /// Proxy the request to the bound backend. The backend-facing verb is
    /// always POST regardless of the route's own verb.
    Proxy { verb: HttpMethod, target: OutputRef },
    /// Terminate locally with a canned request template.
    Mock { request_template: String },
    /// Reach the bound backend under a declared substrate integration type.
    Custom {
        kind: String,
        verb: HttpMethod,
        target: OutputRef,
    },
}

/// Typed attributes of a graph node, one variant per provider resource
/// family.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    RestApi {
        description: Option<String>,
    },
    Resource {
        rest_api: NodeId,
        parent: ParentRef,
        path_part: String,
    },
    Method {
        rest_api: NodeId,
        resource: NodeId,
        http_method: HttpMethod,
        authorization: Authorization,
        authorizer: Option<NodeId>,
    },
    Integration {
        rest_api: NodeId,
        resource: NodeId,
        http_method: HttpMethod,
        spec: IntegrationSpec,
    },
    MethodResponse {
        method: NodeId,
        status_code: String,
        response_headers: Vec<String>,
    },
    IntegrationResponse {
        integration: NodeId,
        status_code: String,
        response_headers: BTreeMap<String, String>,
    },
    Function {
        runtime: String,
        handler: String,
        artifact: String,
        timeout: u32,
        environment: BTreeMap<String, String>,
        description: String,
        policies: Vec<String>,
    },
    Permission {
        function: NodeId,
        action: String,
        principal: String,
        source_pattern: String,
    },
    Authorizer {
        rest_api: NodeId,
        identity_source: String,
        provider: NodeId,
    },
    UserPool,
    UserPoolClient {
        user_pool: NodeId,
        callback_urls: Vec<String>,
    },
    UserPoolDomain {
        user_pool: NodeId,
        domain: String,
    },
    Table {
        hash_key: String,
        range_key: Option<String>,
    },
    Bucket {
        index_document: String,
    },
    Distribution {
        origin: NodeId,
    },
    Deployment {
        rest_api: NodeId,
        triggers: BTreeMap<String, String>,
    },
    Stage {
        rest_api: NodeId,
        deployment: NodeId,
        stage_name: String,
    },
}

impl NodeKind {
    /// A stable label for the resource family, used in counts and reports.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::RestApi { .. } => "rest_api",
            NodeKind::Resource { .. } => "resource",
            NodeKind::Method { .. } => "method",
            NodeKind::Integration { .. } => "integration",
            NodeKind::MethodResponse { .. } => "method_response",
            NodeKind::IntegrationResponse { .. } => "integration_response",
            NodeKind::Function { .. } => "function",
            NodeKind::Permission { .. } => "permission",
            NodeKind::Authorizer { .. } => "authorizer",
            NodeKind::UserPool => "user_pool",
            NodeKind::UserPoolClient { .. } => "user_pool_client",
            NodeKind::UserPoolDomain { .. } => "user_pool_domain",
            NodeKind::Table { .. } => "table",
            NodeKind::Bucket { .. } => "bucket",
            NodeKind::Distribution { .. } => "distribution",
            NodeKind::Deployment { .. } => "deployment",
            NodeKind::Stage { .. } => "stage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_ref_placeholder() {
        let handle = OutputRef::new(NodeId(3), "getAllTodo", "invoke_arn");
        assert_eq!(handle.placeholder(), "${getAllTodo.invoke_arn}");
    }

    #[test]
    fn test_output_ref_serializes_as_placeholder() {
        let handle = OutputRef::new(NodeId(0), "todoApi", "execution_arn");
        let json = serde_json::to_string(&handle).expect("serialize");
        assert_eq!(json, "\"${todoApi.execution_arn}\"");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(NodeKind::UserPool.label(), "user_pool");
        assert_eq!(
            NodeKind::RestApi { description: None }.label(),
            "rest_api"
        );
    }
}
