//! `ztgate score` - Evaluate trust factors.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use zerotrust::{TrustScore, TrustTier};

use super::Context;
use crate::cli::args::ScoreArgs;
use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct ScoreReport<'a> {
    #[serde(flatten)]
    score: &'a TrustScore,
    tier: TrustTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    decayed_from: Option<u32>,
}

pub fn execute(ctx: &Context, args: &ScoreArgs) -> Result<()> {
    let now = Utc::now();
    let evaluator = ctx.evaluator();
    let initial = ctx.score(&args.factors, now)?;

    let (score, decayed_from) = if args.factors.age_minutes > 0 {
        (evaluator.decay_at(&initial, now)?, Some(initial.overall()))
    } else {
        (initial, None)
    };
    let tier = evaluator.classify(&score);

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&ScoreReport {
            score: &score,
            tier,
            decayed_from,
        })?,
        OutputFormat::Pretty => {
            println!("{} {}", "Subject:".bold(), score.subject_id());
            println!(
                "{} {} / 100  {}",
                "Score:".bold(),
                score.overall().to_string().cyan().bold(),
                output::tier_label(tier)
            );
            if let Some(from) = decayed_from {
                println!(
                    "{} {} -> {} after {} min",
                    "Decayed:".bold(),
                    from,
                    score.overall(),
                    args.factors.age_minutes
                );
            }

            println!();
            for factor in score.factors() {
                let sign = if factor.kind.is_penalty() { "-" } else { "+" };
                println!(
                    "  {:<9} {}{:>3} / {}",
                    factor.name(),
                    sign,
                    factor.value,
                    factor.max
                );
            }

            if ctx.verbose {
                println!();
                println!("{} {}", "Valid until:".dimmed(), score.valid_until().to_rfc3339().dimmed());
            }
        }
    }

    Ok(())
}
