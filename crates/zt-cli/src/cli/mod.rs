//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::{Config, Overrides};
use crate::telemetry;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then apply flag/env overrides
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply(&Overrides {
        log_level: cli.log_level,
        health_interval: cli.health_interval,
        health_timeout: cli.health_timeout,
        health_path: cli.health_path,
    });
    config.validate()?;

    telemetry::init(&config, cli.verbose)?;

    let ctx = commands::Context {
        output_format: cli.output.unwrap_or_default(),
        verbose: cli.verbose,
        config,
    };

    match cli.command {
        Commands::Serve => commands::serve::execute(ctx).await,
        Commands::Catalog(args) => commands::catalog::execute(ctx, args).await,
        Commands::Score(args) => commands::score::execute(&ctx, &args),
        Commands::Access(args) => commands::access::execute(ctx, args).await,
    }
}
