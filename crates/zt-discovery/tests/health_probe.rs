//! Health probing against real HTTP backends.

use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zt_core::{DecisionReason, HealthStatus, ServiceCatalogEntry, TrustScore};
use zt_discovery::{gate, HttpHealthProbe, ServiceRegistry};

async fn backend(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

fn score(overall: u32) -> TrustScore {
    let now = Utc::now();
    TrustScore::new("alice", overall, Vec::new(), now, now + ChronoDuration::minutes(5))
}

#[tokio::test]
async fn failing_backend_is_denied_even_at_full_trust() {
    let server = backend(500).await;
    let probe = HttpHealthProbe::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let registry = ServiceRegistry::new(Arc::new(probe));
    registry
        .register(ServiceCatalogEntry::new("user-service", server.uri()).with_required_trust(25))
        .unwrap();

    let report = registry.check_all().await;
    assert_eq!(report.unhealthy, 1);

    let entry = registry.get("user-service").unwrap();
    assert_eq!(entry.health, HealthStatus::Unhealthy);
    assert!(entry.last_checked.is_some());

    let decision = gate::decide(&score(100), &entry, None);
    assert!(!decision.granted);
    assert_eq!(decision.reason, DecisionReason::ServiceUnhealthy);
}

#[tokio::test]
async fn recovered_backend_is_allowed_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let registry = ServiceRegistry::new(Arc::new(HttpHealthProbe::new().unwrap()));
    registry.register(ServiceCatalogEntry::new("svc", server.uri())).unwrap();

    assert_eq!(registry.check_now("svc").await.unwrap(), HealthStatus::Unhealthy);
    assert_eq!(registry.check_now("svc").await.unwrap(), HealthStatus::Healthy);
    assert!(gate::decide(&score(10), &registry.get("svc").unwrap(), None).granted);
}

#[tokio::test]
async fn hanging_backend_does_not_hold_up_others() {
    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&slow)
        .await;
    let fast = backend(200).await;

    let probe = HttpHealthProbe::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    let registry = ServiceRegistry::new(Arc::new(probe));
    registry.register(ServiceCatalogEntry::new("slow", slow.uri())).unwrap();
    registry.register(ServiceCatalogEntry::new("fast", fast.uri())).unwrap();

    let started = Instant::now();
    let report = registry.check_all().await;

    // Bounded by the probe timeout, not the 30 s backend delay.
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(report.healthy, 1);
    assert_eq!(report.unhealthy, 1);
    assert!(registry.get("fast").unwrap().is_healthy());
    assert_eq!(registry.get("slow").unwrap().health, HealthStatus::Unhealthy);
}
