//! Discovery surface: catalog queries and trust-gated authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zt_core::{AccessDecision, Result, ServiceCatalogEntry, TrustScore};
use zt_trust::TrustEvaluator;

use crate::catalog::bootstrap_defaults;
use crate::config::DiscoveryConfig;
use crate::gate;
use crate::registry::{Registration, ServiceRegistry};

/// Snapshot of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceListing {
    /// Services sorted by name
    pub services: Vec<ServiceCatalogEntry>,
    /// Number of services
    pub count: usize,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}

impl ServiceListing {
    fn new(mut services: Vec<ServiceCatalogEntry>) -> Self {
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            count: services.len(),
            services,
            timestamp: Utc::now(),
        }
    }
}

/// Registry plus trust evaluator behind one handle.
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct Discovery {
    registry: ServiceRegistry,
    evaluator: TrustEvaluator,
}

impl Discovery {
    /// Wrap an existing registry
    #[must_use]
    pub const fn new(registry: ServiceRegistry, evaluator: TrustEvaluator) -> Self {
        Self { registry, evaluator }
    }

    /// Build an HTTP-probed registry from `config`, seeded with the default
    /// catalog (when enabled) and then the configured services
    pub fn from_config(config: &DiscoveryConfig, evaluator: TrustEvaluator) -> Result<Self> {
        let registry = ServiceRegistry::from_config(config)?;
        if config.bootstrap_defaults {
            bootstrap_defaults(&registry)?;
        }
        for entry in &config.services {
            registry.register(entry.clone())?;
        }
        Ok(Self::new(registry, evaluator))
    }

    /// Underlying registry
    #[must_use]
    pub const fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Evaluator used for decay
    #[must_use]
    pub const fn evaluator(&self) -> &TrustEvaluator {
        &self.evaluator
    }

    /// Every registered service
    pub fn list_services(&self) -> ServiceListing {
        ServiceListing::new(self.registry.list())
    }

    /// Services whose last probe succeeded
    pub fn list_healthy(&self) -> ServiceListing {
        ServiceListing::new(self.registry.list_healthy())
    }

    /// Services visible at `trust` (all when `None`), optionally only the
    /// healthy ones
    ///
    /// Both filters apply to the same registry snapshot.
    pub fn list_filtered(&self, trust: Option<u32>, healthy_only: bool) -> ServiceListing {
        let mut services = match trust {
            Some(trust) => self.registry.list_by_trust_level(trust),
            None => self.registry.list(),
        };
        if healthy_only {
            services.retain(ServiceCatalogEntry::is_healthy);
        }
        ServiceListing::new(services)
    }

    /// Look up one service
    pub fn get_service(&self, name: &str) -> Result<ServiceCatalogEntry> {
        self.registry.get(name)
    }

    /// Register or overwrite a service
    pub fn register_service(&self, entry: ServiceCatalogEntry) -> Result<Registration> {
        self.registry.register(entry)
    }

    /// Remove a service
    pub fn deregister_service(&self, name: &str) -> Result<ServiceCatalogEntry> {
        self.registry.deregister(name)
    }

    /// Services visible to the holder of `score`
    pub fn services_for(&self, score: &TrustScore) -> ServiceListing {
        ServiceListing::new(self.registry.list_by_trust_level(score.overall()))
    }

    /// Decide access to `service`, optionally narrowed to an endpoint.
    ///
    /// An unknown service yields a `ServiceUnknown` denial rather than an
    /// error. A score whose validity window has closed is denied as
    /// `ScoreExpired` and must be re-evaluated. A score still in its window
    /// but computed before `now` is decayed to `now` first.
    pub fn authorize(
        &self,
        score: &TrustScore,
        service: &str,
        path: Option<&str>,
        method: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AccessDecision> {
        let decision = match self.registry.get(service) {
            Ok(entry) if !score.is_valid_at(now) => AccessDecision::expired(
                gate::required_trust_for(&entry, path, method),
                score.overall(),
            ),
            Ok(entry) => {
                let current = if score.computed_at() < now {
                    self.evaluator.decay_at(score, now)?
                } else {
                    score.clone()
                };
                match (path, method) {
                    (Some(path), Some(method)) => gate::decide_for_method(&current, &entry, path, method),
                    (path, _) => gate::decide(&current, &entry, path),
                }
            }
            Err(e) if e.is_not_found() => AccessDecision::unknown(score.overall()),
            Err(e) => return Err(e),
        };

        debug!(
            subject = score.subject_id(),
            service,
            path = path.unwrap_or(""),
            granted = decision.granted,
            reason = %decision.reason,
            required = decision.required_trust,
            actual = decision.actual_trust,
            "access decision"
        );
        Ok(decision)
    }
}
