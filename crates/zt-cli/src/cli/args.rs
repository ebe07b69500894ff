//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Zero-trust access gateway
///
/// Scores subjects from trust factors, decides access to registered
/// services, and keeps the service catalog's health current.
#[derive(Parser, Debug)]
#[command(name = "ztgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "ZT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, env = "LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Seconds between health-check cycles
    #[arg(long, env = "HEALTH_CHECK_INTERVAL", global = true)]
    pub health_interval: Option<u64>,

    /// Per-probe timeout in seconds
    #[arg(long, env = "HEALTH_TIMEOUT_SECONDS", global = true)]
    pub health_timeout: Option<u64>,

    /// Health path appended to each service URL
    #[arg(long, env = "HEALTH_ENDPOINT", global = true)]
    pub health_path: Option<String>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the health monitor until interrupted
    Serve,

    /// List registered services
    Catalog(CatalogArgs),

    /// Compute a trust score from factor values
    Score(ScoreArgs),

    /// Decide whether a trust score may reach a service
    Access(AccessArgs),
}

// ============================================================================
// Trust factors (shared by score and access)
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct FactorArgs {
    /// Subject the score is computed for
    #[arg(long, default_value = "cli")]
    pub subject: String,

    /// Identity assurance (0-30)
    #[arg(long, default_value_t = 0)]
    pub identity: u32,

    /// Device posture (0-25)
    #[arg(long, default_value_t = 0)]
    pub device: u32,

    /// Behavioral consistency (0-20)
    #[arg(long, default_value_t = 0)]
    pub behavior: u32,

    /// Location plausibility (0-15)
    #[arg(long, default_value_t = 0)]
    pub location: u32,

    /// Risk penalty (0-10, subtracted)
    #[arg(long, default_value_t = 0)]
    pub risk: u32,

    /// Pretend the score was computed this many minutes ago
    #[arg(long, default_value_t = 0)]
    pub age_minutes: u32,
}

// ============================================================================
// Catalog command
// ============================================================================

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Only services visible at this trust level
    #[arg(short, long)]
    pub trust: Option<u32>,

    /// Only services whose last probe succeeded (implies --probe)
    #[arg(long)]
    pub healthy: bool,

    /// Run one health-check cycle before listing
    #[arg(short, long)]
    pub probe: bool,
}

// ============================================================================
// Score command
// ============================================================================

#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub factors: FactorArgs,
}

// ============================================================================
// Access command
// ============================================================================

#[derive(Args, Debug)]
pub struct AccessArgs {
    /// Service name (e.g. audit-service)
    pub service: String,

    /// Endpoint path (e.g. /api/users/42)
    #[arg(long)]
    pub path: Option<String>,

    /// HTTP method for the endpoint
    #[arg(short, long)]
    pub method: Option<String>,

    /// Probe the service before deciding
    #[arg(long)]
    pub probe: bool,

    #[command(flatten)]
    pub factors: FactorArgs,
}
