use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_NAMESPACE, ERROR_FAILED_TO_PARSE_CONFIG, ERROR_FAILED_TO_READ_CONFIG,
    ERROR_FAILED_TO_WRITE_CONFIG,
};

/// Settings for the analyzer engine and run-collector pod construction
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Namespace run-collector pods are placed in
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Upper bound on analyzers evaluated concurrently; defaults to the CPU count
    #[serde(default)]
    pub max_parallel_analyzers: Option<usize>,

    /// Enable debug logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            max_parallel_analyzers: None,
            verbose: false,
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("{}: {}", ERROR_FAILED_TO_READ_CONFIG, path.display()))?;

        let config: EngineConfig =
            serde_yaml::from_str(&content).context(ERROR_FAILED_TO_PARSE_CONFIG)?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .context(format!("{} to {}", ERROR_FAILED_TO_WRITE_CONFIG, path.display()))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Number of analyzer worker threads, never zero
    pub fn worker_threads(&self) -> usize {
        match self.max_parallel_analyzers {
            Some(n) if n > 0 => n,
            _ => num_cpus::get(),
        }
    }
}

/// Load configuration from `config_path`, or fall back to defaults.
///
/// A path that exists but cannot be parsed is an error; a missing path or no
/// path at all yields [`EngineConfig::default`].
pub fn load_or_default(config_path: Option<&Path>) -> Result<EngineConfig> {
    match config_path {
        Some(path) if path.exists() => EngineConfig::from_yaml_file(path),
        Some(path) => {
            info!(
                "Config file {} not found, using default configuration",
                path.display()
            );
            Ok(EngineConfig::default())
        }
        None => {
            debug!("No config path provided, using default configuration");
            Ok(EngineConfig::default())
        }
    }
}
