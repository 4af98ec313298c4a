//! Configuration loading for the CLI.

use crate::error::{CliError, Result};
use harvester_pipeline::{OutputConfig, PipelineConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "harvester.toml";

/// Load the pipeline configuration.
///
/// An explicit path must exist. Without one, `harvester.toml` in the working
/// directory is used when present, defaults otherwise. `output_dir` overrides
/// the configured output directory.
pub fn load_config(path: Option<&Path>, output_dir: Option<&Path>) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_config(&default_path)?
            } else {
                PipelineConfig::default()
            }
        }
    };

    if let Some(dir) = output_dir {
        config.output = OutputConfig::new(dir);
    }

    config.validate().map_err(CliError::Config)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<PipelineConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CliError::Config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let config: PipelineConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}
