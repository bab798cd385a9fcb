//! Operations behind the CLI commands.
//!
//! Each op takes the parsed manifest, does the work, and returns a report
//! struct for the command to render.

mod check;
mod explain;
mod plan;
mod routes;

pub use check::check;
pub use explain::explain;
pub use plan::{PlanOptions, plan};
pub use routes::routes;
