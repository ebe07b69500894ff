//! Trust-scored access control and service discovery.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use zerotrust::{Discovery, DiscoveryConfig, TrustEvaluator, TrustFactor};
//! use chrono::Utc;
//!
//! fn main() -> zerotrust::Result<()> {
//!     let evaluator = TrustEvaluator::default();
//!     let discovery = Discovery::from_config(&DiscoveryConfig::default(), evaluator.clone())?;
//!
//!     let now = Utc::now();
//!     let score = evaluator.evaluate(
//!         "alice",
//!         &[
//!             TrustFactor::identity(25)?,
//!             TrustFactor::device(20)?,
//!             TrustFactor::behavior(18)?,
//!             TrustFactor::location(12)?,
//!             TrustFactor::risk(7)?,
//!         ],
//!         now,
//!     )?;
//!
//!     let decision = discovery.authorize(&score, "audit-service", None, None, now)?;
//!     println!("granted: {}", decision.granted);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for health probes
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/zerotrust/0.1.0")]

// Re-export core types
pub use zt_core::*;

// Re-export trust scoring
pub use zt_trust::{ScoreCache, SignalSource, StaticSignals, TrustConfig, TrustEvaluator, TrustTier};

// Re-export discovery
pub use zt_discovery::{
    bootstrap_defaults, default_catalog, gate, CycleReport, Discovery, DiscoveryConfig, HealthMonitor,
    HealthProbe, HttpHealthProbe, Registration, ServiceListing, ServiceRegistry,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
