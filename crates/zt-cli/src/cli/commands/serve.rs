//! `ztgate serve` - Run the health monitor.

use anyhow::Result;
use colored::Colorize;
use tracing::info;
use zerotrust::HealthMonitor;

use super::Context;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: Context) -> Result<()> {
    let discovery = ctx.discovery()?;
    let interval = ctx.config.discovery.health_check_interval();

    info!(
        services = discovery.registry().len(),
        interval_secs = interval.as_secs(),
        health_path = %ctx.config.discovery.health_path,
        "catalog loaded"
    );
    if ctx.output_format == OutputFormat::Pretty {
        println!(
            "{} {} services, probing every {}s. Press Ctrl-C to stop.",
            "Serving".green().bold(),
            discovery.registry().len(),
            interval.as_secs()
        );
    }

    let monitor = HealthMonitor::start(discovery.registry().clone(), interval)?;

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    monitor.shutdown().await;

    if ctx.output_format == OutputFormat::Json {
        output::print_json(&discovery.list_services())?;
    }
    Ok(())
}
