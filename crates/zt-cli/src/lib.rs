//! # zt-cli
//!
//! Command-line front end for the zerotrust access engine.
//!
//! ## Features
//!
//! - **serve**: run the health monitor over the configured catalog
//! - **catalog**: list services, filtered by trust or health
//! - **score**: evaluate trust factors and show the resulting tier
//! - **access**: decide whether a score may reach a service or endpoint
//! - **Output formats**: colored text or JSON

pub mod cli;
pub mod config;
pub mod output;
pub mod telemetry;

pub use cli::run;
