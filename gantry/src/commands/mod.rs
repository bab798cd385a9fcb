mod check;
mod completions;
mod explain;
mod init;
mod plan;
mod routes;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use explain::ExplainCommand;
use eyre::Result;
use init::InitCommand;
use plan::PlanCommand;
use routes::RoutesCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for gantry_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "gantry")]
#[command(version)]
#[command(about = "Compile a declarative route manifest into a provider resource plan")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Plan(cmd) => cmd.run(),
            Commands::Routes(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new gantry project
    Init(InitCommand),

    /// Validate gantry.toml without assembling a plan
    Check(CheckCommand),

    /// Compile gantry.toml into a resource plan
    Plan(PlanCommand),

    /// List the route tree defined in gantry.toml
    Routes(RoutesCommand),

    /// Show the compilation pipeline and what it found
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
