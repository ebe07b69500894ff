//! Trust evaluation settings.

use serde::{Deserialize, Serialize};
use zt_core::{Result, ZtError};

/// Settings for [`TrustEvaluator`](crate::TrustEvaluator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustConfig {
    /// How long a computed score stays valid (default: 300 s, the re-verification cadence).
    #[serde(default = "default_validity_window")]
    pub validity_window_secs: u64,

    /// Points lost per minute between verifications (default: 1.0).
    #[serde(default = "default_decay_rate")]
    pub decay_rate_per_minute: f64,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            validity_window_secs: default_validity_window(),
            decay_rate_per_minute: default_decay_rate(),
        }
    }
}

impl TrustConfig {
    /// Validity window as a chrono duration.
    #[must_use]
    pub fn validity_window(&self) -> chrono::Duration {
        i64::try_from(self.validity_window_secs.min(MAX_VALIDITY_WINDOW_SECS))
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::seconds(300))
    }

    /// Reject settings the evaluator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.validity_window_secs == 0 {
            return Err(ZtError::Config("validity_window_secs must be positive".into()));
        }
        if self.validity_window_secs > MAX_VALIDITY_WINDOW_SECS {
            return Err(ZtError::Config(format!(
                "validity_window_secs must be at most {MAX_VALIDITY_WINDOW_SECS}"
            )));
        }
        if !self.decay_rate_per_minute.is_finite() || self.decay_rate_per_minute < 0.0 {
            return Err(ZtError::Config(format!(
                "decay_rate_per_minute must be a non-negative number, got {}",
                self.decay_rate_per_minute
            )));
        }
        Ok(())
    }
}

/// Upper bound on the validity window (one day)
pub const MAX_VALIDITY_WINDOW_SECS: u64 = 86_400;

const fn default_validity_window() -> u64 {
    300
}

const fn default_decay_rate() -> f64 {
    1.0
}
