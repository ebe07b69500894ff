//! `ztgate access` - Decide access for a trust score.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tracing::warn;
use zerotrust::{AccessDecision, TrustTier};

use super::Context;
use crate::cli::args::AccessArgs;
use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct AccessReport<'a> {
    service: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'a str>,
    tier: TrustTier,
    status_code: u16,
    #[serde(flatten)]
    decision: AccessDecision,
}

pub async fn execute(ctx: Context, args: AccessArgs) -> Result<()> {
    let discovery = ctx.discovery()?;
    let now = Utc::now();
    let score = ctx.score(&args.factors, now)?;

    if args.probe {
        if let Err(e) = discovery.registry().check_now(&args.service).await {
            warn!(service = %args.service, error = %e, "could not probe service");
        }
    }

    let decision = discovery.authorize(
        &score,
        &args.service,
        args.path.as_deref(),
        args.method.as_deref(),
        now,
    )?;

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&AccessReport {
            service: &args.service,
            path: args.path.as_deref(),
            method: args.method.as_deref(),
            tier: TrustTier::from_overall(decision.actual_trust),
            status_code: decision.status_code(),
            decision,
        })?,
        OutputFormat::Pretty => {
            let target = match (&args.method, &args.path) {
                (Some(method), Some(path)) => format!("{} {method} {path}", args.service),
                (None, Some(path)) => format!("{}{path}", args.service),
                _ => args.service.clone(),
            };
            output::print_decision(&target, &decision);
        }
    }

    Ok(())
}
