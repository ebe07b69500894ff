//! In-memory service catalog with health state.
//!
//! All state sits behind one read-write lock. Readers take the shared lock,
//! registration and health updates take the exclusive lock, and no network
//! I/O ever happens while either is held: a probe cycle snapshots the
//! targets, releases the lock, probes, then re-locks briefly per result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};
use url::Url;
use zt_core::{HealthStatus, Result, ServiceCatalogEntry, ZtError};

use crate::config::DiscoveryConfig;
use crate::probe::{HealthProbe, HttpHealthProbe};

/// Acknowledgement returned by [`ServiceRegistry::register`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Always `"registered"`
    pub status: String,
    /// Registered name
    pub name: String,
    /// True if an existing entry was overwritten
    pub replaced: bool,
}

/// Tally of one health-check cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Probes whose result was recorded
    pub checked: usize,
    /// Services found healthy
    pub healthy: usize,
    /// Services found unhealthy
    pub unhealthy: usize,
    /// Probes discarded because the entry changed or vanished mid-probe
    pub skipped: usize,
}

/// Authoritative, thread-safe catalog of backend services.
///
/// Cloning is cheap and every clone shares the same catalog.
#[derive(Clone)]
pub struct ServiceRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    services: RwLock<HashMap<String, ServiceCatalogEntry>>,
    probe: Arc<dyn HealthProbe>,
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.len())
            .finish_non_exhaustive()
    }
}

impl ServiceRegistry {
    /// Create an empty registry probing through `probe`
    pub fn new(probe: Arc<dyn HealthProbe>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                services: RwLock::new(HashMap::new()),
                probe,
            }),
        }
    }

    /// Create an empty registry with an HTTP probe built from `config`
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self> {
        config.validate()?;
        let probe = HttpHealthProbe::builder()
            .health_path(config.health_path.clone())
            .timeout(config.probe_timeout())
            .build()?;
        Ok(Self::new(Arc::new(probe)))
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ServiceCatalogEntry>> {
        self.inner
            .services
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ServiceCatalogEntry>> {
        self.inner
            .services
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register or overwrite a service.
    ///
    /// Re-registering a name replaces every caller-owned field. Health is
    /// owned by the registry: it is kept when the base URL is unchanged and
    /// reset to `Unknown` otherwise.
    pub fn register(&self, mut entry: ServiceCatalogEntry) -> Result<Registration> {
        validate_entry(&entry)?;

        let name = entry.name.clone();

        let replaced = {
            let mut services = self.write();
            match services.get(&name) {
                Some(existing) if existing.base_url == entry.base_url => {
                    entry.health = existing.health;
                    entry.last_checked = existing.last_checked;
                }
                _ => {
                    entry.health = HealthStatus::Unknown;
                    entry.last_checked = None;
                }
            }
            services.insert(name.clone(), entry).is_some()
        };

        info!(service = %name, replaced, "registered service");

        Ok(Registration {
            status: "registered".to_string(),
            name,
            replaced,
        })
    }

    /// Remove a service
    pub fn deregister(&self, name: &str) -> Result<ServiceCatalogEntry> {
        let removed = self.write().remove(name);
        match removed {
            Some(entry) => {
                info!(service = %name, "deregistered service");
                Ok(entry)
            }
            None => Err(ZtError::NotFound {
                service: name.to_string(),
            }),
        }
    }

    /// Look up a service by name
    pub fn get(&self, name: &str) -> Result<ServiceCatalogEntry> {
        self.read().get(name).cloned().ok_or_else(|| ZtError::NotFound {
            service: name.to_string(),
        })
    }

    /// Returns true if `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Every registered service, in no particular order
    pub fn list(&self) -> Vec<ServiceCatalogEntry> {
        self.read().values().cloned().collect()
    }

    /// Services whose last probe succeeded
    pub fn list_healthy(&self) -> Vec<ServiceCatalogEntry> {
        self.read()
            .values()
            .filter(|entry| entry.health == HealthStatus::Healthy)
            .cloned()
            .collect()
    }

    /// Services visible at the given trust level (`required_trust <= trust`)
    pub fn list_by_trust_level(&self, trust: u32) -> Vec<ServiceCatalogEntry> {
        self.read()
            .values()
            .filter(|entry| entry.required_trust <= trust)
            .cloned()
            .collect()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Probe one service now and record the result
    pub async fn check_now(&self, name: &str) -> Result<HealthStatus> {
        let base_url = self.get(name)?.base_url;
        let status = self.inner.probe.check(&base_url).await;
        self.record(name, &base_url, status, Utc::now());
        Ok(status)
    }

    /// Run one health-check cycle over every registered service.
    ///
    /// Probes run as independent tasks so a hanging backend cannot hold up
    /// the others; each result is recorded as soon as its probe finishes.
    /// The cycle completes once every probe has finished or timed out.
    pub async fn check_all(&self) -> CycleReport {
        let targets: Vec<(String, String)> = self
            .read()
            .values()
            .map(|entry| (entry.name.clone(), entry.base_url.clone()))
            .collect();

        let handles: Vec<_> = targets
            .into_iter()
            .map(|(name, base_url)| {
                let registry = self.clone();
                tokio::spawn(async move {
                    let status = registry.inner.probe.check(&base_url).await;
                    registry
                        .record(&name, &base_url, status, Utc::now())
                        .then_some(status)
                })
            })
            .collect();

        let mut report = CycleReport::default();
        for result in futures_util::future::join_all(handles).await {
            match result {
                Ok(Some(HealthStatus::Healthy)) => {
                    report.checked += 1;
                    report.healthy += 1;
                }
                Ok(Some(_)) => {
                    report.checked += 1;
                    report.unhealthy += 1;
                }
                Ok(None) => report.skipped += 1,
                Err(e) => {
                    warn!(error = %e, "health probe task failed");
                    report.skipped += 1;
                }
            }
        }

        debug!(
            checked = report.checked,
            healthy = report.healthy,
            unhealthy = report.unhealthy,
            skipped = report.skipped,
            "health check cycle complete"
        );
        report
    }

    /// Store a probe result unless the entry was removed or re-pointed
    /// while the probe was in flight.
    fn record(&self, name: &str, base_url: &str, status: HealthStatus, at: DateTime<Utc>) -> bool {
        let previous = {
            let mut services = self.write();
            let Some(entry) = services.get_mut(name) else {
                return false;
            };
            if entry.base_url != base_url {
                return false;
            }
            let previous = entry.health;
            entry.health = status;
            entry.last_checked = Some(at);
            previous
        };

        if previous != status {
            if previous == HealthStatus::Healthy {
                warn!(service = %name, from = %previous, to = %status, "service health changed");
            } else {
                info!(service = %name, from = %previous, to = %status, "service health changed");
            }
        }
        true
    }
}

fn validate_entry(entry: &ServiceCatalogEntry) -> Result<()> {
    if entry.name.trim().is_empty() {
        return Err(ZtError::InvalidEntry("service name is required".into()));
    }
    if entry.base_url.trim().is_empty() {
        return Err(ZtError::InvalidEntry("service URL is required".into()));
    }

    let url = Url::parse(&entry.base_url)
        .map_err(|e| ZtError::InvalidEntry(format!("invalid service URL {:?}: {e}", entry.base_url)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ZtError::InvalidEntry(format!(
            "service URL must be http or https, got {}",
            url.scheme()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Probe answering from a fixed table; unknown URLs are unhealthy.
    #[derive(Default)]
    struct TableProbe {
        answers: Mutex<HashMap<String, HealthStatus>>,
    }

    impl TableProbe {
        fn set(&self, base_url: &str, status: HealthStatus) {
            self.answers.lock().unwrap().insert(base_url.to_string(), status);
        }
    }

    #[async_trait]
    impl HealthProbe for TableProbe {
        async fn check(&self, base_url: &str) -> HealthStatus {
            self.answers
                .lock()
                .unwrap()
                .get(base_url)
                .copied()
                .unwrap_or(HealthStatus::Unhealthy)
        }
    }

    fn registry() -> (ServiceRegistry, Arc<TableProbe>) {
        let probe = Arc::new(TableProbe::default());
        (ServiceRegistry::new(probe.clone()), probe)
    }

    fn entry(name: &str, port: u16, trust: u32) -> ServiceCatalogEntry {
        ServiceCatalogEntry::new(name, format!("http://localhost:{port}")).with_required_trust(trust)
    }

    #[test]
    fn register_and_get() {
        let (registry, _) = registry();
        let reg = registry
            .register(entry("test-service", 8080, 25).with_metadata("version", "1.0.0"))
            .unwrap();
        assert_eq!(reg.status, "registered");
        assert!(!reg.replaced);

        let found = registry.get("test-service").unwrap();
        assert_eq!(found.base_url, "http://localhost:8080");
        assert_eq!(found.required_trust, 25);
        assert_eq!(found.health, HealthStatus::Unknown);
        assert_eq!(found.metadata["version"], "1.0.0");
    }

    #[test]
    fn rejects_invalid_entries() {
        let (registry, _) = registry();
        for bad in [
            ServiceCatalogEntry::new("", "http://localhost:8080"),
            ServiceCatalogEntry::new("   ", "http://localhost:8080"),
            ServiceCatalogEntry::new("svc", ""),
            ServiceCatalogEntry::new("svc", "not a url"),
            ServiceCatalogEntry::new("svc", "ftp://files.local"),
        ] {
            assert!(matches!(registry.register(bad), Err(ZtError::InvalidEntry(_))));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn get_unknown_is_not_found() {
        let (registry, _) = registry();
        assert!(matches!(registry.get("nope"), Err(ZtError::NotFound { .. })));
    }

    #[test]
    fn reregistration_overwrites() {
        let (registry, _) = registry();
        registry.register(entry("svc", 8080, 25)).unwrap();
        let reg = registry
            .register(entry("svc", 8080, 60).with_metadata("owner", "ops"))
            .unwrap();

        assert!(reg.replaced);
        assert_eq!(registry.len(), 1);
        let found = registry.get("svc").unwrap();
        assert_eq!(found.required_trust, 60);
        assert_eq!(found.metadata["owner"], "ops");
    }

    #[test]
    fn identical_reregistration_is_idempotent() {
        let (registry, _) = registry();
        let e = entry("svc", 8080, 25).with_metadata("type", "microservice");
        registry.register(e.clone()).unwrap();
        let before = registry.list();
        registry.register(e).unwrap();
        assert_eq!(registry.list(), before);
    }

    #[test]
    fn caller_cannot_set_health() {
        let (registry, _) = registry();
        let mut e = entry("svc", 8080, 0);
        e.health = HealthStatus::Healthy;
        e.last_checked = Some(Utc::now());
        registry.register(e).unwrap();

        let found = registry.get("svc").unwrap();
        assert_eq!(found.health, HealthStatus::Unknown);
        assert!(found.last_checked.is_none());
    }

    #[tokio::test]
    async fn reregistration_keeps_health_only_for_same_url() {
        let (registry, probe) = registry();
        probe.set("http://localhost:8080", HealthStatus::Healthy);
        registry.register(entry("svc", 8080, 25)).unwrap();
        registry.check_all().await;

        registry.register(entry("svc", 8080, 30)).unwrap();
        assert_eq!(registry.get("svc").unwrap().health, HealthStatus::Healthy);

        registry.register(entry("svc", 9090, 30)).unwrap();
        assert_eq!(registry.get("svc").unwrap().health, HealthStatus::Unknown);
    }

    #[test]
    fn deregister() {
        let (registry, _) = registry();
        registry.register(entry("svc", 8080, 25)).unwrap();
        assert_eq!(registry.deregister("svc").unwrap().name, "svc");
        assert!(registry.is_empty());
        assert!(matches!(registry.deregister("svc"), Err(ZtError::NotFound { .. })));
    }

    #[test]
    fn list_by_trust_level_filters_and_widens() {
        let (registry, _) = registry();
        registry.register(entry("low-trust", 8081, 25)).unwrap();
        registry.register(entry("medium-trust", 8082, 50)).unwrap();
        registry.register(entry("high-trust", 8083, 75)).unwrap();

        assert_eq!(registry.list_by_trust_level(30).len(), 1);
        assert_eq!(registry.list_by_trust_level(50).len(), 2);
        assert_eq!(registry.list_by_trust_level(100).len(), 3);
        assert!(registry.list_by_trust_level(10).is_empty());

        for t in 0..100 {
            let narrow: Vec<String> = registry
                .list_by_trust_level(t)
                .into_iter()
                .map(|e| e.name)
                .collect();
            let wide: Vec<String> = registry
                .list_by_trust_level(t + 1)
                .into_iter()
                .map(|e| e.name)
                .collect();
            assert!(narrow.iter().all(|n| wide.contains(n)), "widening broke at {t}");
        }
    }

    #[tokio::test]
    async fn check_all_updates_health() {
        let (registry, probe) = registry();
        probe.set("http://localhost:8081", HealthStatus::Healthy);
        registry.register(entry("up", 8081, 0)).unwrap();
        registry.register(entry("down", 8082, 0)).unwrap();

        let report = registry.check_all().await;
        assert_eq!(report.checked, 2);
        assert_eq!(report.healthy, 1);
        assert_eq!(report.unhealthy, 1);

        let healthy = registry.list_healthy();
        assert_eq!(healthy.len(), 1);
        assert_eq!(healthy[0].name, "up");
        assert!(registry.get("down").unwrap().last_checked.is_some());
    }

    #[tokio::test]
    async fn check_now_probes_single_service() {
        let (registry, probe) = registry();
        probe.set("http://localhost:8081", HealthStatus::Healthy);
        registry.register(entry("up", 8081, 0)).unwrap();

        assert_eq!(registry.check_now("up").await.unwrap(), HealthStatus::Healthy);
        assert!(registry.get("up").unwrap().is_healthy());
        assert!(registry.check_now("missing").await.is_err());
    }

    #[test]
    fn stale_probe_result_is_discarded() {
        let (registry, _) = registry();
        registry.register(entry("svc", 8080, 0)).unwrap();
        registry.register(entry("svc", 9090, 0)).unwrap();

        assert!(!registry.record("svc", "http://localhost:8080", HealthStatus::Healthy, Utc::now()));
        assert_eq!(registry.get("svc").unwrap().health, HealthStatus::Unknown);
        assert!(!registry.record("gone", "http://localhost:8080", HealthStatus::Healthy, Utc::now()));
    }
}
