// Rust guideline compliant 2026-02-06

//! Configuration management for twinfile.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Directory holding twinfile state inside a repository.
pub const TWINFILE_DIR: &str = ".twinfile";

/// A source file and the mirror copy that tracks it.
///
/// Both paths are relative to the repository root and use forward slashes,
/// matching how Git records paths in patches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorPair {
    /// Path of the file being mirrored.
    pub source: String,
    /// Path of the mirror copy.
    pub dest: String,
}

/// Configuration for twinfile behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mirror pairs to keep in sync.
    #[serde(default, rename = "mirror")]
    pub mirrors: Vec<MirrorPair>,

    /// Whether synced mirrors are staged into the index after patching.
    #[serde(default = "default_auto_stage")]
    pub auto_stage: bool,

    /// Whether whitespace differences are ignored when patching.
    #[serde(default = "default_ignore_whitespace")]
    pub ignore_whitespace: bool,
}

/// Mirrors ride along with the commit by default.
fn default_auto_stage() -> bool {
    true
}

/// Whitespace-insensitive patching by default, like the original workflow.
fn default_ignore_whitespace() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirrors: Vec::new(),
            auto_stage: default_auto_stage(),
            ignore_whitespace: default_ignore_whitespace(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `.twinfile/config.toml`
    /// 3. Environment variables with `TWINFILE_` prefix
    ///
    /// # Arguments
    ///
    /// * `twinfile_dir` - Path to the `.twinfile` directory
    ///
    /// # Returns
    ///
    /// A Config struct with values from file and environment variables applied.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(twinfile_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = twinfile_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let file_config: Config = toml::from_str(&content)
                .map_err(|e| crate::Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
            config = file_config;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `TWINFILE_AUTO_STAGE` - Stage mirrors after sync (true/false)
    /// - `TWINFILE_IGNORE_WHITESPACE` - Ignore whitespace when patching (true/false)
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("TWINFILE_AUTO_STAGE") {
            self.auto_stage = val.parse().map_err(|_| {
                crate::Error::InvalidConfig("TWINFILE_AUTO_STAGE must be true or false".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("TWINFILE_IGNORE_WHITESPACE") {
            self.ignore_whitespace = val.parse().map_err(|_| {
                crate::Error::InvalidConfig(
                    "TWINFILE_IGNORE_WHITESPACE must be true or false".to_string(),
                )
            })?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A mirror pair has an empty source or dest
    /// - A mirror pair points a file at itself
    /// - A path is absolute (paths must be repository-relative)
    /// - Two mirror pairs share the same dest
    fn validate(&self) -> Result<()> {
        let mut seen_dests = std::collections::HashSet::new();

        for pair in &self.mirrors {
            if pair.source.is_empty() || pair.dest.is_empty() {
                return Err(crate::Error::InvalidConfig(
                    "mirror source and dest must be non-empty".to_string(),
                ));
            }

            if pair.source == pair.dest {
                return Err(crate::Error::InvalidConfig(format!(
                    "mirror source and dest are the same path: {}",
                    pair.source
                )));
            }

            if Path::new(&pair.source).is_absolute() || Path::new(&pair.dest).is_absolute() {
                return Err(crate::Error::InvalidConfig(format!(
                    "mirror paths must be repository-relative: {} -> {}",
                    pair.source, pair.dest
                )));
            }

            if !seen_dests.insert(&pair.dest) {
                return Err(crate::Error::InvalidConfig(format!(
                    "duplicate mirror dest: {}",
                    pair.dest
                )));
            }
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Arguments
    ///
    /// * `twinfile_dir` - Path to the `.twinfile` directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, twinfile_dir: &Path) -> Result<()> {
        let config_path = twinfile_dir.join("config.toml");
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::Error::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
