use std::path::{Path, PathBuf};

use clap::Args;
use dialoguer::{Confirm, theme::ColorfulTheme};
use eyre::{Context, Result};

#[derive(Args)]
pub struct InitCommand {
    /// Gateway name (defaults to the current directory name)
    #[arg(default_value = ".")]
    pub name: String,

    /// Output directory (defaults to ./<name>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let (gateway_name, output_dir) = Self::resolve_paths(&self.name, self.output.clone())?;
        let manifest_path = output_dir.join("gantry.toml");

        if manifest_path.exists() {
            let overwrite = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("{} already exists. Overwrite?", manifest_path.display()))
                .default(false)
                .interact()
                .wrap_err("Failed to read confirmation")?;
            if !overwrite {
                println!("Left {} untouched", manifest_path.display());
                return Ok(());
            }
        }

        std::fs::create_dir_all(&output_dir)
            .wrap_err_with(|| format!("Failed to create {}", output_dir.display()))?;
        std::fs::write(&manifest_path, starter_manifest(&gateway_name))
            .wrap_err_with(|| format!("Failed to write {}", manifest_path.display()))?;

        println!("Created {}", manifest_path.display());
        println!();
        println!("Next steps:");
        if output_dir != Path::new(".") {
            println!("  cd {}", output_dir.display());
        }
        println!("  gantry check");
        println!("  gantry plan");

        Ok(())
    }

    fn resolve_paths(name: &str, output: Option<PathBuf>) -> Result<(String, PathBuf)> {
        if name == "." {
            let cwd = std::env::current_dir().wrap_err("Failed to get current directory")?;
            let dir_name = cwd
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| eyre::eyre!("Current directory has no valid name"))?
                .to_string();
            Ok((dir_name, output.unwrap_or_else(|| PathBuf::from("."))))
        } else {
            let output_dir = output.unwrap_or_else(|| PathBuf::from(name));
            Ok((name.to_string(), output_dir))
        }
    }
}

fn starter_manifest(name: &str) -> String {
    format!(
        r#"[gateway]
name = "{name}"
stage = "demo"
backend_src = "./backend"

# Uncomment to require sign-in on methods:
# [auth]
# domain = "{name}-demo"

[routes."/ping"]
description = "Health check"

[routes."/ping".methods.GET]
name = "ping"
handler = "app.ping"
auth = "none"
"#
    )
}
