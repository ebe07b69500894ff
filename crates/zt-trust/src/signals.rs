//! Sources of raw trust signals.
//!
//! Device attestation, behavioral telemetry and geolocation live outside
//! this workspace; they plug in by implementing [`SignalSource`].

use async_trait::async_trait;
use std::collections::HashMap;
use zt_core::{Result, TrustFactor, ZtError};

/// Supplies the current trust factors for a subject.
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Collect the latest factors for `subject_id`
    async fn collect(&self, subject_id: &str) -> Result<Vec<TrustFactor>>;
}

/// Fixed, in-memory signals; used for bootstrap and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSignals {
    subjects: HashMap<String, Vec<TrustFactor>>,
    fallback: Option<Vec<TrustFactor>>,
}

impl StaticSignals {
    /// Create an empty source that knows no subjects
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factors returned for every subject without its own entry
    #[must_use]
    pub fn with_fallback(mut self, factors: Vec<TrustFactor>) -> Self {
        self.fallback = Some(factors);
        self
    }

    /// Factors for a specific subject
    #[must_use]
    pub fn with_subject(mut self, subject_id: impl Into<String>, factors: Vec<TrustFactor>) -> Self {
        self.subjects.insert(subject_id.into(), factors);
        self
    }
}

#[async_trait]
impl SignalSource for StaticSignals {
    async fn collect(&self, subject_id: &str) -> Result<Vec<TrustFactor>> {
        self.subjects
            .get(subject_id)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| ZtError::Signal(format!("no signals for subject {subject_id}")))
    }
}
