//! Latest trust score per subject.
//!
//! Holds the last full evaluation for each subject and hands out a decayed
//! copy until the evaluation's validity window closes. After that the caller
//! must re-evaluate.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;
use zt_core::TrustScore;

use crate::evaluator::TrustEvaluator;

/// Shared per-subject score store.
#[derive(Debug, Clone, Default)]
pub struct ScoreCache {
    evaluator: TrustEvaluator,
    scores: Arc<RwLock<HashMap<String, TrustScore>>>,
}

impl ScoreCache {
    /// Create an empty cache that decays with `evaluator`'s settings
    #[must_use]
    pub fn new(evaluator: TrustEvaluator) -> Self {
        Self {
            evaluator,
            scores: Arc::default(),
        }
    }

    /// Remember a freshly evaluated score, replacing any previous one
    pub fn store(&self, score: TrustScore) {
        let mut scores = self.scores.write().unwrap_or_else(PoisonError::into_inner);
        scores.insert(score.subject_id().to_string(), score);
    }

    /// Current score for a subject, decayed to `now`
    ///
    /// Returns `None` if the subject is unknown or its last evaluation has
    /// expired.
    pub fn current(&self, subject_id: &str, now: DateTime<Utc>) -> Option<TrustScore> {
        let stored = {
            let scores = self.scores.read().unwrap_or_else(PoisonError::into_inner);
            scores.get(subject_id).cloned()
        }?;

        if !stored.is_valid_at(now) {
            debug!(subject = subject_id, "cached trust score expired");
            return None;
        }

        self.evaluator.decay_at(&stored, now).ok()
    }

    /// Forget a subject
    pub fn evict(&self, subject_id: &str) -> Option<TrustScore> {
        let mut scores = self.scores.write().unwrap_or_else(PoisonError::into_inner);
        scores.remove(subject_id)
    }

    /// Drop every expired evaluation, returning how many were removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut scores = self.scores.write().unwrap_or_else(PoisonError::into_inner);
        let before = scores.len();
        scores.retain(|_, score| score.is_valid_at(now));
        before - scores.len()
    }

    /// Number of subjects held
    pub fn len(&self) -> usize {
        self.scores.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if no subjects are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
