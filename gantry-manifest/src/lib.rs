// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Parsing and validation for `gantry.toml`.
//!
//! The manifest is the declarative route surface: gateway metadata, optional
//! auth/table/site sections, and the path-keyed route table. Parsing fails
//! fast (an invalid surface must never reach the assembler, let alone
//! partially provision), and every schema error carries a labeled span into
//! the TOML source for miette rendering.

mod error;
mod gateway;
mod manifest;
mod route;
mod validate;

pub use error::{Error, Result};
pub use gateway::{AuthConfig, GatewayConfig, SiteConfig, TableConfig};
pub use manifest::Manifest;
pub use route::{
    AuthMode, FunctionConfig, Integration, RouteConfig, Verb, logical_name_for_path,
};
pub use validate::ParseContext;
