use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::Result;
use gantry_compiler::surface::DisplayStyle;
use gantry_manifest::Manifest;

use super::UnwrapOrExit;
use crate::ops;
use crate::reports::{Report, TerminalOutput};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum TreeStyle {
    /// Indented path segments
    Simple,
    /// Segments with their verbs
    #[default]
    Methods,
    /// Segments with descriptions
    Descriptions,
    /// Box-drawing tree with method counts
    Tree,
}

impl From<TreeStyle> for DisplayStyle {
    fn from(style: TreeStyle) -> Self {
        match style {
            TreeStyle::Simple => DisplayStyle::Simple,
            TreeStyle::Methods => DisplayStyle::WithMethods,
            TreeStyle::Descriptions => DisplayStyle::WithDescriptions,
            TreeStyle::Tree => DisplayStyle::TreeBox,
        }
    }
}

#[derive(Args)]
pub struct RoutesCommand {
    /// Path to gantry.toml (defaults to ./gantry.toml)
    #[arg(short, long, default_value = "gantry.toml")]
    pub config: PathBuf,

    /// Display style
    #[arg(short, long, value_enum, default_value = "methods")]
    pub style: TreeStyle,
}

impl RoutesCommand {
    /// Run the routes command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();

        let report = ops::routes(&manifest, self.style.into())?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
