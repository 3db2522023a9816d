//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod get;
pub mod vendor;

use std::path::Path;

use invex_core::PipelineConfig;

/// Load the pipeline config from `--config`, falling back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PipelineConfig> {
    match config_path {
        Some(path) => Ok(PipelineConfig::from_file(Path::new(path))?),
        None => Ok(PipelineConfig::default()),
    }
}
