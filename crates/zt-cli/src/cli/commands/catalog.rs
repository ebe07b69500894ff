//! `ztgate catalog` - List registered services.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use zerotrust::{CycleReport, ServiceListing};

use super::Context;
use crate::cli::args::CatalogArgs;
use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct CatalogReport {
    #[serde(flatten)]
    listing: ServiceListing,
    #[serde(skip_serializing_if = "Option::is_none")]
    probe: Option<CycleReport>,
}

pub async fn execute(ctx: Context, args: CatalogArgs) -> Result<()> {
    let discovery = ctx.discovery()?;

    let probe = if args.probe || args.healthy {
        Some(discovery.registry().check_all().await)
    } else {
        None
    };

    let listing = discovery.list_filtered(args.trust, args.healthy);

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&CatalogReport { listing, probe })?,
        OutputFormat::Pretty => {
            output::print_services(&listing.services, ctx.verbose);
            println!();
            println!("{} {}", "Services:".bold(), listing.count.to_string().cyan());
            if let Some(report) = probe {
                println!(
                    "{} {} healthy, {} unhealthy",
                    "Probe:".bold(),
                    report.healthy.to_string().green(),
                    report.unhealthy.to_string().red()
                );
            }
        }
    }

    Ok(())
}
