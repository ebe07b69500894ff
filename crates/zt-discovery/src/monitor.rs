//! Background health-check loop.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zt_core::{Result, ZtError};

use crate::registry::ServiceRegistry;

/// Handle to a running health-check loop.
///
/// Cancelling stops new cycles from starting; a cycle already under way
/// runs to completion, its probes bounded by their own timeout.
/// [`HealthMonitor::shutdown`] cancels and waits for that drain.
#[derive(Debug)]
pub struct HealthMonitor {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    /// Start probing `registry` every `interval`
    ///
    /// The first cycle runs one interval after start; services registered
    /// in between stay `Unknown` until then.
    pub fn start(registry: ServiceRegistry, interval: Duration) -> Result<Self> {
        Self::start_with_token(registry, interval, CancellationToken::new())
    }

    /// Start probing under an externally owned cancellation token
    pub fn start_with_token(
        registry: ServiceRegistry,
        interval: Duration,
        token: CancellationToken,
    ) -> Result<Self> {
        if interval.is_zero() {
            return Err(ZtError::Config("health check interval must be positive".into()));
        }

        info!(interval_secs = interval.as_secs_f64(), "starting health monitor");
        let handle = tokio::spawn(run(registry, interval, token.clone()));

        Ok(Self { token, handle })
    }

    /// Token controlling this loop
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Stop scheduling new cycles without waiting
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the loop has exited
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel and wait for the current cycle to drain
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "health monitor task ended abnormally");
        }
        info!("health monitor stopped");
    }
}

async fn run(registry: ServiceRegistry, interval: Duration, token: CancellationToken) {
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // A cycle under way is never interrupted; cancellation is only
        // observed between cycles and wins over a pending tick.
        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("health monitor cancelled");
                break;
            }
            _ = ticker.tick() => {
                let report = registry.check_all().await;
                info!(
                    services = report.checked,
                    healthy = report.healthy,
                    unhealthy = report.unhealthy,
                    "health check cycle"
                );
            }
        }
    }
}
