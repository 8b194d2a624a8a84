//! Configuration management for taskrank.
//!
//! Configuration lives in an optional `taskrank.yaml` file, found by
//! searching up from the working directory. Missing files mean defaults.

use crate::domain::Strategy;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "taskrank.yaml";

/// Default number of tasks returned by `suggest`
pub const DEFAULT_SUGGEST_LIMIT: usize = 3;

/// Maximum directory depth to traverse when searching for a config file
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for taskrank
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Strategy used when neither the command line nor the input names one
    #[serde(default)]
    pub default_strategy: Strategy,

    /// Number of tasks returned by `suggest`
    #[serde(default = "default_suggest_limit")]
    pub suggest_limit: usize,
}

fn default_suggest_limit() -> usize {
    DEFAULT_SUGGEST_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::default(),
            suggest_limit: DEFAULT_SUGGEST_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// sets `suggest-limit` to zero.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Load the nearest `taskrank.yaml` at or above `start_dir`, or defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if a config file is found but cannot be loaded.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        match find_config_file(start_dir) {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!(start = %start_dir.display(), "No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.suggest_limit == 0 {
            return Err(Error::Config("suggest-limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Search for a config file starting from `start_dir` and walking up.
///
/// Traversal is bounded by [`MAX_TRAVERSAL_DEPTH`].
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

/// Write a default config file into `dir`.
///
/// # Errors
///
/// Returns an error if a config file already exists there or writing fails.
pub fn init(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(Error::Config(format!(
            "Taskrank is already configured in this directory. Found existing '{CONFIG_FILE_NAME}'"
        )));
    }

    Config::default().save(&path)?;
    tracing::debug!(path = %path.display(), "Wrote default configuration");
    Ok(path)
}
