//! Command implementations.

pub mod access;
pub mod catalog;
pub mod score;
pub mod serve;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use zerotrust::{Discovery, TrustEvaluator, TrustFactor, TrustScore};

use crate::cli::args::FactorArgs;
use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: Config,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Evaluator built from the trust settings.
    pub fn evaluator(&self) -> TrustEvaluator {
        TrustEvaluator::new(self.config.trust.clone())
    }

    /// Registry seeded from the discovery settings.
    pub fn discovery(&self) -> Result<Discovery> {
        Ok(Discovery::from_config(&self.config.discovery, self.evaluator())?)
    }

    /// Evaluate the factor flags, backdated by `--age-minutes`.
    ///
    /// Returns the score as first computed; callers decay it to `now`.
    pub fn score(&self, args: &FactorArgs, now: DateTime<Utc>) -> Result<TrustScore> {
        let factors = [
            TrustFactor::identity(args.identity)?,
            TrustFactor::device(args.device)?,
            TrustFactor::behavior(args.behavior)?,
            TrustFactor::location(args.location)?,
            TrustFactor::risk(args.risk)?,
        ];
        let computed_at = now - Duration::minutes(i64::from(args.age_minutes));
        Ok(self.evaluator().evaluate(&args.subject, &factors, computed_at)?)
    }
}
