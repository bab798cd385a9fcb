//! Intermediate representation types for the gantry route-tree compiler.
//!
//! This crate provides the unified type definitions shared across the gantry
//! compilation pipeline. The IR is the fully defaulted, validated description
//! of an API surface that the plan assembler consumes read-only.
//!
//! # Architecture
//!
//! ```text
//! gantry.toml (TOML) → gantry-manifest (parsing) → gantry-ir (lowered surface) → plan assembly
//! ```
//!
//! The IR types are designed to be:
//! - Substrate-agnostic (no provider resource concerns)
//! - Free of provisioning state (invocation handles live in the build
//!   context, never on descriptors)
//! - Self-contained (no dependencies beyond serde)

mod surface;
mod types;

pub use surface::{
    ApiMeta, ApiSurface, AuthSpec, RouteFunction, RouteNode, SiteSpec, TableSpec,
};
pub use types::{Authorization, HttpMethod, IntegrationKind};
