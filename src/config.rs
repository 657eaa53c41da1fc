//! Run configuration for the summation demo, read from TOML.
//!
//! ```toml
//! length = 10000000
//! workers = 8
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// About 80 MB of `i64`.
pub const DEFAULT_LENGTH: usize = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SumConfig {
    /// Number of elements in the synthetic `0..length` sequence.
    pub length: usize,
    /// Worker threads; `None` means one per logical CPU.
    pub workers: Option<usize>,
}

impl Default for SumConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            workers: None,
        }
    }
}

impl SumConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SumConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        length: Option<usize>,
        workers: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(length) = length {
            self.length = length;
        }
        if workers.is_some() {
            self.workers = workers;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::Invalid(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }
}
