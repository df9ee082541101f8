//! Engine configuration loaded from TOML.
//!
//! ```toml
//! name = "Minimax 0.1"
//!
//! [search]
//! depth = 4
//! perspective = "relative"
//! tie_break = "first_equal"
//! ```

use std::path::{Path, PathBuf};

use minimax_engine::{SearchConfig, MAX_DEPTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("search depth {0} is outside 1..={MAX_DEPTH}")]
    InvalidDepth(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reported in `id name`
    pub name: String,
    /// Reported in `id author`
    pub author: String,
    pub search: SearchConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: format!("Minimax {}", env!("CARGO_PKG_VERSION")),
            author: "minimax-chess".to_string(),
            search: SearchConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(contents)?;
        if !(1..=MAX_DEPTH).contains(&config.search.depth) {
            return Err(ConfigError::InvalidDepth(config.search.depth));
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
