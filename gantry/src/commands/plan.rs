use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use gantry_manifest::Manifest;

use super::UnwrapOrExit;
use crate::ops::{self, PlanOptions};
use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct PlanCommand {
    /// Path to gantry.toml (defaults to ./gantry.toml)
    #[arg(short, long, default_value = "gantry.toml")]
    pub config: PathBuf,

    /// Write the plan JSON to this path
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Dump per-phase snapshots under .gantry/debug
    #[arg(long)]
    pub visualize: bool,
}

impl PlanCommand {
    /// Run the plan command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();

        let report = ops::plan(
            &manifest,
            &PlanOptions {
                out: self.out.clone(),
                visualize: self.visualize,
                debug_dir: PathBuf::from(".gantry/debug"),
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
