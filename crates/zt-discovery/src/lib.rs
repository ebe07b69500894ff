//! Trust-gated service discovery.
//!
//! This crate keeps the authoritative catalog of backend services, probes
//! their health in the background, and answers whether a given trust score
//! may reach a given service or endpoint.
//!
//! - [`ServiceRegistry`]: concurrent catalog with per-service health
//! - [`HealthMonitor`]: periodic probe loop, stopped via cancellation
//! - [`gate`]: pure access decisions; unhealthy services fail closed
//! - [`Discovery`]: registry and evaluator behind one handle

#![doc(html_root_url = "https://docs.rs/zt-discovery/0.1.0")]

pub mod api;
pub mod catalog;
mod config;
pub mod gate;
mod monitor;
mod probe;
mod registry;

pub use api::{Discovery, ServiceListing};
pub use catalog::{bootstrap_defaults, default_catalog};
pub use config::DiscoveryConfig;
pub use monitor::HealthMonitor;
pub use probe::{HealthProbe, HttpHealthProbe, HttpHealthProbeBuilder, DEFAULT_HEALTH_PATH, DEFAULT_PROBE_TIMEOUT};
pub use registry::{CycleReport, Registration, ServiceRegistry};
pub use zt_core::{Result, ZtError};
