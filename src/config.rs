//! Server configuration.
//!
//! Loaded from an explicit path, ./toolbench.yml, or
//! ~/.config/toolbench/toolbench.yml, falling back to defaults. Values are
//! supplied to the transport and binary at construction; dispatch
//! semantics never read them. Environment lookup belongs to the embedding
//! application, not this module.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration consumed by the server and binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Mount prefix for an HTTP transport. A stdio transport has no path
    /// space; the value is surfaced in startup diagnostics only.
    #[serde(rename = "base-path")]
    pub base_path: String,

    /// Maximum duration of one tools/call before the transport gives up.
    #[serde(rename = "max-duration-secs")]
    pub max_duration_secs: u64,

    /// Raise the log filter to debug.
    #[serde(rename = "verbose-logs")]
    pub verbose_logs: bool,

    /// Key-value store URL for transport-level stream resumability.
    /// Forwarded, never consulted by dispatch.
    #[serde(rename = "resumability-store-url")]
    pub resumability_store_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            max_duration_secs: default_max_duration_secs(),
            verbose_logs: false,
            resumability_store_url: None,
        }
    }
}

fn default_base_path() -> String {
    "/api".to_string()
}

fn default_max_duration_secs() -> u64 {
    60
}

impl ServerConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. toolbench.yml in current directory
    /// 3. ~/.config/toolbench/toolbench.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from("toolbench.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from toolbench.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load toolbench.yml: {}", e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("toolbench").join("toolbench.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_duration_secs == 0 {
            eyre::bail!("max-duration-secs must be > 0");
        }
        if !self.base_path.starts_with('/') {
            eyre::bail!("base-path must start with '/'");
        }
        Ok(())
    }

    /// Request timeout as a Duration.
    pub fn max_duration(&self) -> Duration {
        Duration::from_secs(self.max_duration_secs)
    }
}
