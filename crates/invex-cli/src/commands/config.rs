//! Config command - inspect and initialize pipeline configuration.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use invex_core::PipelineConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show {
        /// Config file to load (default: built-in defaults)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Write a default config file
    Init {
        /// Where to write the config file
        #[arg(required = true)]
        path: PathBuf,
    },
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.action {
        ConfigAction::Show { path } => {
            let config = match path {
                Some(path) => PipelineConfig::from_file(&path)?,
                None => PipelineConfig::default(),
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init { path } => {
            if path.exists() {
                anyhow::bail!("refusing to overwrite {}", path.display());
            }
            PipelineConfig::default().save(&path)?;
            println!("{} wrote {}", style("✓").green(), path.display());
        }
    }

    Ok(())
}
