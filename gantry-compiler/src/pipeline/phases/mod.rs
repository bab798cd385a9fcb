//! Built-in pipeline phases.

mod analyze;
mod lower;
mod validate;

pub use analyze::AnalyzePhase;
pub use lower::{LowerPhase, lower_manifest};
pub use validate::{Lint, LintInfo, ValidatePhase};
