use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{FactorKind, TrustFactor};
use crate::error::{Result, ZtError};

/// Highest possible overall trust score
pub const MAX_TRUST: u32 = 100;

/// A subject's trust score at a point in time
///
/// Scores are immutable: re-evaluating or decaying produces a new value.
/// Fields are read through accessors so a score handed out by the evaluator
/// cannot be edited in place.
///
/// Decoding goes through the same checks: `overall` above [`MAX_TRUST`], an
/// out-of-range factor, or a window ending before it starts is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrustScore")]
pub struct TrustScore {
    subject_id: String,
    overall: u32,
    factors: Vec<TrustFactor>,
    computed_at: DateTime<Utc>,
    valid_until: DateTime<Utc>,
}

impl TrustScore {
    /// Assemble a score; `overall` is capped at [`MAX_TRUST`]
    #[must_use]
    pub fn new(
        subject_id: impl Into<String>,
        overall: u32,
        factors: Vec<TrustFactor>,
        computed_at: DateTime<Utc>,
        valid_until: DateTime<Utc>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            overall: overall.min(MAX_TRUST),
            factors,
            computed_at,
            valid_until,
        }
    }

    /// Subject the score belongs to
    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Aggregate score in `0..=100`
    #[must_use]
    pub const fn overall(&self) -> u32 {
        self.overall
    }

    /// Factors in the order they were supplied
    #[must_use]
    pub fn factors(&self) -> &[TrustFactor] {
        &self.factors
    }

    /// Look up a single factor
    #[must_use]
    pub fn factor(&self, kind: FactorKind) -> Option<&TrustFactor> {
        self.factors.iter().find(|f| f.kind == kind)
    }

    /// When the score was computed
    #[must_use]
    pub const fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    /// When the score stops being usable without re-verification
    #[must_use]
    pub const fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    /// Returns true while `now` is before `valid_until`
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.valid_until
    }

    /// Time since computation, zero if `now` precedes it
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.computed_at).max(Duration::zero())
    }
}

#[derive(Deserialize)]
struct RawTrustScore {
    subject_id: String,
    overall: u32,
    factors: Vec<TrustFactor>,
    computed_at: DateTime<Utc>,
    valid_until: DateTime<Utc>,
}

impl TryFrom<RawTrustScore> for TrustScore {
    type Error = ZtError;

    fn try_from(raw: RawTrustScore) -> Result<Self> {
        if raw.overall > MAX_TRUST {
            return Err(ZtError::InvalidScore(format!(
                "overall {} exceeds {MAX_TRUST}",
                raw.overall
            )));
        }
        if raw.valid_until < raw.computed_at {
            return Err(ZtError::InvalidScore("valid_until precedes computed_at".into()));
        }
        for factor in &raw.factors {
            factor.validate()?;
        }
        Ok(Self {
            subject_id: raw.subject_id,
            overall: raw.overall,
            factors: raw.factors,
            computed_at: raw.computed_at,
            valid_until: raw.valid_until,
        })
    }
}
