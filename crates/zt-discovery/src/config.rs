//! Registry and health-probing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use zt_core::{Result, ServiceCatalogEntry, ZtError};

/// Settings for the service registry and its health monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Seconds between health-check cycles (default: 30).
    #[serde(default = "default_check_interval")]
    pub health_check_interval_secs: u64,

    /// Per-probe timeout in seconds (default: 5).
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Path appended to each service's base URL for probing (default: /health).
    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Register the built-in gateway/IdP/user/admin/audit catalog at startup.
    #[serde(default = "default_true")]
    pub bootstrap_defaults: bool,

    /// Additional services registered at startup.
    #[serde(default)]
    pub services: Vec<ServiceCatalogEntry>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            health_check_interval_secs: default_check_interval(),
            probe_timeout_secs: default_probe_timeout(),
            health_path: default_health_path(),
            bootstrap_defaults: true,
            services: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Interval between health-check cycles.
    #[must_use]
    pub const fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_secs)
    }

    /// Timeout for a single probe.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Reject settings the monitor cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.health_check_interval_secs == 0 {
            return Err(ZtError::Config(
                "health_check_interval_secs must be positive".into(),
            ));
        }
        if self.probe_timeout_secs == 0 {
            return Err(ZtError::Config("probe_timeout_secs must be positive".into()));
        }
        if !self.health_path.starts_with('/') {
            return Err(ZtError::Config(format!(
                "health_path must start with '/', got {:?}",
                self.health_path
            )));
        }
        Ok(())
    }
}

// Default value functions for serde.
const fn default_check_interval() -> u64 {
    30
}

const fn default_probe_timeout() -> u64 {
    5
}

fn default_health_path() -> String {
    String::from("/health")
}

const fn default_true() -> bool {
    true
}
