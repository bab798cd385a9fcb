//! Deployment fingerprinting.
//!
//! The deployment's change trigger is a SHA-256 digest over the canonical
//! JSON of the assembled API definition: the gateway resources, methods,
//! integrations, and responses, referenced by logical name rather than by
//! node index so the digest only moves when the API surface itself does.
//! The substrate creates a new deployment revision iff the digest differs
//! from the recorded one.

use serde_json::{Value, json};
use sha2::{Digest, Sha256};

use crate::graph::{NodeKind, ParentRef, ResourceGraph};

/// Project the API-defining subgraph into a canonical JSON document.
pub fn api_definition(graph: &ResourceGraph) -> Value {
    let mut api = Value::Null;
    let mut resources = Vec::new();
    let mut methods = Vec::new();
    let mut integrations = Vec::new();
    let mut responses = Vec::new();

    for node in graph.nodes() {
        match &node.kind {
            NodeKind::RestApi { description } => {
                api = json!({
                    "name": node.name,
                    "description": description,
                });
            }
            NodeKind::Resource { parent, path_part, .. } => {
                let parent = match parent {
                    ParentRef::Root => Value::Null,
                    ParentRef::Resource(id) => Value::String(graph.name_of(*id).to_string()),
                };
                resources.push(json!({
                    "name": node.name,
                    "parent": parent,
                    "path_part": path_part,
                }));
            }
            NodeKind::Method {
                resource,
                http_method,
                authorization,
                authorizer,
                ..
            } => {
                methods.push(json!({
                    "name": node.name,
                    "resource": graph.name_of(*resource),
                    "http_method": http_method,
                    "authorization": authorization,
                    "authorizer": authorizer.map(|id| graph.name_of(id).to_string()),
                }));
            }
            NodeKind::Integration {
                resource,
                http_method,
                spec,
                ..
            } => {
                integrations.push(json!({
                    "name": node.name,
                    "resource": graph.name_of(*resource),
                    "http_method": http_method,
                    "spec": spec,
                }));
            }
            NodeKind::MethodResponse {
                method,
                status_code,
                response_headers,
            } => {
                responses.push(json!({
                    "name": node.name,
                    "method": graph.name_of(*method),
                    "status_code": status_code,
                    "response_headers": response_headers,
                }));
            }
            NodeKind::IntegrationResponse {
                integration,
                status_code,
                response_headers,
            } => {
                responses.push(json!({
                    "name": node.name,
                    "integration": graph.name_of(*integration),
                    "status_code": status_code,
                    "response_headers": response_headers,
                }));
            }
            _ => {}
        }
    }

    json!({
        "api": api,
        "resources": resources,
        "methods": methods,
        "integrations": integrations,
        "responses": responses,
    })
}

/// SHA-256 digest of the canonical JSON rendering of a definition.
pub fn fingerprint(definition: &Value) -> String {
    let rendered = definition.to_string();
    let mut hasher = Sha256::new();
    hasher.update(rendered.as_bytes());
    format!("{:x}", hasher.finalize())
}
