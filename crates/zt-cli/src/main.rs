//! ztgate - zero-trust access gateway CLI
//!
//! Scores subjects, checks access against the service catalog, and runs the
//! background health monitor.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    zt_cli::run().await
}
