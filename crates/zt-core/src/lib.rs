//! Core types and errors for the zerotrust access engine.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - **Types**: trust factors and scores, service catalog entries and their
//!   endpoints, and access decisions
//! - **Errors**: a single error taxonomy with [`ZtError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use zt_core::{ServiceCatalogEntry, TrustFactor};
//!
//! let entry = ServiceCatalogEntry::new("audit-service", "http://localhost:8084")
//!     .with_required_trust(50);
//! let identity = TrustFactor::identity(30)?;
//! ```

#![doc(html_root_url = "https://docs.rs/zt-core/0.1.0")]

mod error;
pub mod types;

pub use error::{Result, ZtError};
pub use types::*;
