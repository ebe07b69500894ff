//! Score computation and time-based decay.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;
use zt_core::{Result, TrustFactor, TrustScore, ZtError, MAX_TRUST};

use crate::config::TrustConfig;
use crate::signals::SignalSource;
use crate::tier::TrustTier;

/// Computes, decays and classifies trust scores.
///
/// Stateless apart from its configuration; cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct TrustEvaluator {
    config: TrustConfig,
}

impl TrustEvaluator {
    /// Create an evaluator with the given settings
    #[must_use]
    pub const fn new(config: TrustConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    #[must_use]
    pub const fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Compute a fresh score from raw factors.
    ///
    /// Every factor must satisfy `value <= max` and each factor kind may
    /// appear at most once. Missing factors contribute nothing.
    pub fn evaluate(
        &self,
        subject_id: &str,
        factors: &[TrustFactor],
        now: DateTime<Utc>,
    ) -> Result<TrustScore> {
        let mut seen = HashSet::with_capacity(factors.len());
        let mut total: i64 = 0;

        for factor in factors {
            factor.validate()?;
            if !seen.insert(factor.kind) {
                return Err(ZtError::DuplicateFactor(factor.kind.to_string()));
            }
            total += factor.contribution();
        }

        let overall = clamp_overall(total);
        debug!(subject = subject_id, overall, "evaluated trust score");

        Ok(TrustScore::new(
            subject_id,
            overall,
            factors.to_vec(),
            now,
            now + self.config.validity_window(),
        ))
    }

    /// Erode a previous score by `rate` points per elapsed minute.
    ///
    /// Only whole points are charged: at 1.0/min a sub-minute gap costs
    /// nothing and one full minute costs one point. The returned score is
    /// stamped at `now` with a fresh validity window; the factor breakdown is
    /// carried over unchanged. Callers must check the previous score's
    /// validity first, since decay does not.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn decay(
        &self,
        previous: &TrustScore,
        now: DateTime<Utc>,
        decay_rate_per_minute: f64,
    ) -> Result<TrustScore> {
        if !decay_rate_per_minute.is_finite() || decay_rate_per_minute < 0.0 {
            return Err(ZtError::InvalidDecayRate(decay_rate_per_minute));
        }

        let minutes = previous.age(now).num_milliseconds() as f64 / 60_000.0;
        let reduction = (decay_rate_per_minute * minutes).floor();
        let overall = (f64::from(previous.overall()) - reduction).max(0.0) as u32;

        debug!(
            subject = previous.subject_id(),
            from = previous.overall(),
            to = overall,
            minutes,
            "decayed trust score"
        );

        Ok(TrustScore::new(
            previous.subject_id(),
            overall,
            previous.factors().to_vec(),
            now,
            now + self.config.validity_window(),
        ))
    }

    /// Decay using the configured rate
    pub fn decay_at(&self, previous: &TrustScore, now: DateTime<Utc>) -> Result<TrustScore> {
        self.decay(previous, now, self.config.decay_rate_per_minute)
    }

    /// Map a score onto its access tier
    #[must_use]
    pub const fn classify(&self, score: &TrustScore) -> TrustTier {
        TrustTier::classify(score)
    }

    /// Collect signals for a subject and evaluate them
    pub async fn assess<S>(&self, source: &S, subject_id: &str, now: DateTime<Utc>) -> Result<TrustScore>
    where
        S: SignalSource + ?Sized,
    {
        let factors = source.collect(subject_id).await?;
        self.evaluate(subject_id, &factors, now)
    }
}

fn clamp_overall(total: i64) -> u32 {
    u32::try_from(total.clamp(0, i64::from(MAX_TRUST))).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use zt_core::FactorKind;

    fn factors(identity: u32, device: u32, behavior: u32, location: u32, risk: u32) -> Vec<TrustFactor> {
        vec![
            TrustFactor::identity(identity).unwrap(),
            TrustFactor::device(device).unwrap(),
            TrustFactor::behavior(behavior).unwrap(),
            TrustFactor::location(location).unwrap(),
            TrustFactor::risk(risk).unwrap(),
        ]
    }

    #[test]
    fn evaluates_reference_breakdown() {
        let evaluator = TrustEvaluator::default();
        let now = Utc::now();
        let score = evaluator
            .evaluate("alice", &factors(30, 20, 18, 12, 2), now)
            .unwrap();

        assert_eq!(score.overall(), 78);
        assert_eq!(evaluator.classify(&score), TrustTier::User);
        assert_eq!(score.computed_at(), now);
        assert_eq!(score.valid_until(), now + Duration::minutes(5));
        assert_eq!(score.factors().len(), 5);
        assert_eq!(score.factors()[0].kind, FactorKind::Identity);
    }

    #[test]
    fn overall_stays_in_range() {
        let evaluator = TrustEvaluator::default();
        let now = Utc::now();

        let max = evaluator.evaluate("a", &factors(30, 25, 20, 15, 0), now).unwrap();
        assert_eq!(max.overall(), 90);

        let floor = evaluator.evaluate("a", &factors(0, 0, 0, 0, 10), now).unwrap();
        assert_eq!(floor.overall(), 0);

        let wide = [
            TrustFactor::with_max(FactorKind::Identity, 80, 80).unwrap(),
            TrustFactor::with_max(FactorKind::Device, 60, 60).unwrap(),
        ];
        assert_eq!(evaluator.evaluate("a", &wide, now).unwrap().overall(), 100);
    }

    #[test]
    fn rejects_out_of_range_factor() {
        let evaluator = TrustEvaluator::default();
        let bad = TrustFactor {
            kind: FactorKind::Device,
            weight: 25,
            value: 30,
            max: 25,
        };
        let err = evaluator.evaluate("a", &[bad], Utc::now()).unwrap_err();
        assert!(matches!(err, ZtError::InvalidFactorRange { value: 30, max: 25, .. }));
    }

    #[test]
    fn rejects_duplicate_factor() {
        let evaluator = TrustEvaluator::default();
        let dup = [TrustFactor::device(10).unwrap(), TrustFactor::device(12).unwrap()];
        assert!(matches!(
            evaluator.evaluate("a", &dup, Utc::now()),
            Err(ZtError::DuplicateFactor(_))
        ));
    }

    #[test]
    fn decay_is_linear_and_floored() {
        let evaluator = TrustEvaluator::default();
        let t0 = Utc::now();
        let score = evaluator.evaluate("a", &factors(30, 20, 18, 12, 2), t0).unwrap();

        let later = evaluator.decay(&score, t0 + Duration::minutes(10), 1.0).unwrap();
        assert_eq!(later.overall(), 68);
        assert_eq!(later.computed_at(), t0 + Duration::minutes(10));
        assert_eq!(later.valid_until(), t0 + Duration::minutes(15));
        assert_eq!(later.factors(), score.factors());

        let gone = evaluator.decay(&score, t0 + Duration::hours(3), 1.0).unwrap();
        assert_eq!(gone.overall(), 0);
    }

    #[test]
    fn decay_charges_whole_points_only() {
        let evaluator = TrustEvaluator::default();
        let t0 = Utc::now();
        let score = evaluator.evaluate("a", &factors(30, 20, 0, 0, 0), t0).unwrap();
        assert_eq!(score.overall(), 50);

        for elapsed in [Duration::milliseconds(1), Duration::seconds(30), Duration::milliseconds(59_999)] {
            assert_eq!(evaluator.decay(&score, t0 + elapsed, 1.0).unwrap().overall(), 50);
        }
        assert_eq!(evaluator.decay(&score, t0 + Duration::minutes(1), 1.0).unwrap().overall(), 49);
        assert_eq!(evaluator.decay(&score, t0 + Duration::seconds(90), 2.0).unwrap().overall(), 47);
    }

    #[test]
    fn decay_is_non_increasing_in_elapsed_time() {
        let evaluator = TrustEvaluator::default();
        let t0 = Utc::now();
        let score = evaluator.evaluate("a", &factors(30, 25, 20, 15, 0), t0).unwrap();

        let mut last = score.overall();
        for secs in (0..=9_000).step_by(45) {
            let decayed = evaluator
                .decay(&score, t0 + Duration::seconds(secs), 0.75)
                .unwrap();
            assert!(decayed.overall() <= last);
            last = decayed.overall();
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn decay_never_raises_score_for_past_timestamps() {
        let evaluator = TrustEvaluator::default();
        let t0 = Utc::now();
        let score = evaluator.evaluate("a", &factors(30, 20, 18, 12, 2), t0).unwrap();
        let earlier = evaluator.decay(&score, t0 - Duration::minutes(3), 1.0).unwrap();
        assert_eq!(earlier.overall(), score.overall());
    }

    #[test]
    fn decay_rejects_bad_rates() {
        let evaluator = TrustEvaluator::default();
        let score = evaluator.evaluate("a", &[], Utc::now()).unwrap();
        assert!(matches!(
            evaluator.decay(&score, Utc::now(), -0.5),
            Err(ZtError::InvalidDecayRate(_))
        ));
        assert!(evaluator.decay(&score, Utc::now(), f64::INFINITY).is_err());
    }
}
