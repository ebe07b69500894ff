//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zerotrust::{DiscoveryConfig, TrustConfig};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level filter used when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Trust scoring settings.
    #[serde(default)]
    pub trust: TrustConfig,

    /// Registry and health-probe settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            trust: TrustConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub health_interval: Option<u64>,
    pub health_timeout: Option<u64>,
    pub health_path: Option<String>,
}

impl Config {
    /// Default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("rs", "zerotrust", "ztgate")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the platform config file is
    /// used if present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        Ok(config)
    }

    /// Apply flag and environment overrides.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(level) = &overrides.log_level {
            self.log_level.clone_from(level);
        }
        if let Some(secs) = overrides.health_interval {
            self.discovery.health_check_interval_secs = secs;
        }
        if let Some(secs) = overrides.health_timeout {
            self.discovery.probe_timeout_secs = secs;
        }
        if let Some(path) = &overrides.health_path {
            self.discovery.health_path.clone_from(path);
        }
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("log_level must not be empty");
        }
        self.trust.validate()?;
        self.discovery.validate()?;
        Ok(())
    }
}
