//! Configuration for tracelens
//!
//! The only configurable data is the pricing table. Lookup order:
//! 1. an explicit path (`--config` or `TRACELENS_CONFIG`); failures are errors
//! 2. `tracelens.toml` in the working directory
//! 3. `<user config dir>/tracelens/config.toml`
//! 4. built-in defaults
//!
//! Discovered files that fail to load are reported and skipped.
//!
//! A `[pricing]` section replaces the built-in table as a whole: providers it
//! does not list (including the built-in gemini, openai and anthropic rates)
//! fall back to `[pricing.default]`, which itself defaults to 0.10/0.30.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TraceError};
use crate::pricing::PricingTable;

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "tracelens.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingTable,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| TraceError::io_operation("read config", path.display(), e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| TraceError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    /// Resolve the effective configuration
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(TraceError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!(path = %path.display(), "loading explicit config");
            return Self::load(path);
        }

        for candidate in Self::candidates(cwd) {
            if !candidate.exists() {
                continue;
            }
            match Self::load(&candidate) {
                Ok(config) => {
                    debug!(path = %candidate.display(), "loaded config");
                    return Ok(config);
                }
                Err(e) => {
                    warn!(path = %candidate.display(), error = %e, "ignoring unreadable config, using defaults");
                    return Ok(Self::default());
                }
            }
        }

        Ok(Self::default())
    }

    fn candidates(cwd: &Path) -> Vec<PathBuf> {
        let mut paths = vec![cwd.join(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tracelens").join("config.toml"));
        }
        paths
    }
}
