//! Trust scoring for the zerotrust access engine.
//!
//! Turns a set of [`TrustFactor`]s into an immutable [`TrustScore`], erodes
//! scores over time between full re-verifications, and maps scores onto
//! access tiers.
//!
//! # Scoring
//!
//! `overall = identity + device + behavior + location - risk`, clamped to
//! `0..=100`. Risk is a penalty: a lower raw risk value is better.
//!
//! # Decay
//!
//! Between verification cycles the score drops linearly with elapsed time,
//! so a decision made late in the cycle sees a lower score rather than a
//! stale one.

pub mod cache;
pub mod config;
pub mod evaluator;
pub mod signals;
pub mod tier;

pub use cache::ScoreCache;
pub use config::TrustConfig;
pub use evaluator::TrustEvaluator;
pub use signals::{SignalSource, StaticSignals};
pub use tier::TrustTier;

pub use zt_core::{FactorKind, Result, TrustFactor, TrustScore, ZtError};
