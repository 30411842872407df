//! Batcher configuration.
//!
//! Capacities are fixed for the lifetime of a [`Batcher`](crate::render2d::Batcher),
//! so they are chosen up front, either in code or from a JSON file:
//!
//! ```json
//! { "max_vertices": 8192, "max_indices": 16384 }
//! ```
//!
//! Missing fields fall back to the defaults (2048 vertices, 4096 indices, no
//! protected transform depth).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_VERTICES: usize = 2048;
pub const DEFAULT_MAX_INDICES: usize = 4096;

/// Sizes and limits for a [`Batcher`](crate::render2d::Batcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatcherConfig {
    pub max_vertices: usize,
    pub max_indices: usize,
    /// Transform stack entries that `pop` will never remove.
    pub min_transform_depth: usize,
}

impl Default for BatcherConfig {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_MAX_VERTICES,
            max_indices: DEFAULT_MAX_INDICES,
            min_transform_depth: 0,
        }
    }
}

impl BatcherConfig {
    pub fn with_capacity(max_vertices: usize, max_indices: usize) -> Self {
        Self {
            max_vertices,
            max_indices,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::debug!(
            "loaded batcher config from {}: {:?}",
            path.as_ref().display(),
            config
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_vertices == 0 || self.max_indices == 0 {
            return Err(ConfigError::Invalid(
                "max_vertices and max_indices must be non-zero".into(),
            ));
        }
        // Indices are u32 on the GPU side.
        if self.max_vertices > u32::MAX as usize || self.max_indices > u32::MAX as usize {
            return Err(ConfigError::Invalid(
                "capacities must fit in a 32-bit index".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_capacities() {
        let c = BatcherConfig::default();
        assert_eq!(c.max_vertices, 2048);
        assert_eq!(c.max_indices, 4096);
        assert_eq!(c.min_transform_depth, 0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = BatcherConfig::from_json_str(r#"{ "max_vertices": 16 }"#).unwrap();
        assert_eq!(c.max_vertices, 16);
        assert_eq!(c.max_indices, DEFAULT_MAX_INDICES);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = BatcherConfig::from_json_str(r#"{ "max_indices": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = BatcherConfig::from_json_str("{ max_vertices: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = BatcherConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
