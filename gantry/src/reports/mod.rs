//! Report data structures for commands.
//!
//! Commands collect data into reports through the ops layer, then render
//! them to an [`Output`] target. Data collection and rendering stay
//! separate so reports remain testable without a terminal.

mod check;
mod explain;
mod output;
mod plan;
mod routes;

pub use check::CheckReport;
pub use explain::{AnalysisResult, ExplainReport, LintEntry, ManifestInfo, PhaseEntry};
pub use output::{Output, Report, TerminalOutput};
pub use plan::PlanReport;
pub use routes::RoutesReport;
