use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use gantry_manifest::Manifest;

use super::UnwrapOrExit;
use crate::ops;
use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct ExplainCommand {
    /// Path to gantry.toml (defaults to ./gantry.toml)
    #[arg(short, long, default_value = "gantry.toml")]
    pub config: PathBuf,
}

impl ExplainCommand {
    /// Run the explain command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();

        let report = ops::explain(&manifest, &self.config)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
