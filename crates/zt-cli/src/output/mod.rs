//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use zerotrust::{AccessDecision, HealthStatus, ServiceCatalogEntry, TrustTier};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown output format: {s}\nValid formats: pretty, json"),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Tier name colored by privilege.
pub fn tier_label(tier: TrustTier) -> ColoredString {
    match tier {
        TrustTier::Admin => tier.as_str().magenta().bold(),
        TrustTier::User => tier.as_str().green().bold(),
        TrustTier::ReadOnly => tier.as_str().yellow().bold(),
        TrustTier::Denied => tier.as_str().red().bold(),
    }
}

/// Health status colored by outcome.
pub fn health_label(health: HealthStatus) -> ColoredString {
    match health {
        HealthStatus::Healthy => "healthy".green(),
        HealthStatus::Unhealthy => "unhealthy".red(),
        HealthStatus::Unknown => "unknown".dimmed(),
    }
}

/// One line per service, endpoints indented underneath when `detailed`.
pub fn print_services(services: &[ServiceCatalogEntry], detailed: bool) {
    if services.is_empty() {
        println!("{}", "No services.".dimmed());
        return;
    }

    for entry in services {
        println!(
            "{:<16} {:<28} trust>={:<3} {}",
            entry.name.cyan().bold(),
            entry.base_url,
            entry.required_trust,
            health_label(entry.health)
        );
        if detailed {
            for ep in &entry.endpoints {
                println!(
                    "    {:<7} {:<28} trust>={:<3} {}",
                    ep.method.yellow(),
                    ep.path,
                    ep.required_trust,
                    ep.description.dimmed()
                );
            }
        }
    }
}

/// Human-readable access decision.
pub fn print_decision(service: &str, decision: &AccessDecision) {
    let verdict = if decision.granted {
        "GRANTED".green().bold()
    } else {
        "DENIED".red().bold()
    };
    println!("{} {} ({})", verdict, service.cyan(), decision.reason);
    println!(
        "{} {}  {} {}",
        "Required:".bold(),
        decision.required_trust,
        "Actual:".bold(),
        decision.actual_trust
    );
    if decision.shortfall() > 0 {
        println!("{} {} points", "Short by:".bold(), decision.shortfall().to_string().red());
    }
    println!("{} {}", "HTTP status:".bold(), decision.status_code());
}
