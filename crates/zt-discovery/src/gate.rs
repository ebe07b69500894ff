//! Access decisions for one (subject, service) pair.
//!
//! Everything here is pure: the same score, entry and request always yield
//! the same decision.

use zt_core::{AccessDecision, Endpoint, HealthStatus, ServiceCatalogEntry, TrustScore};

/// Decide whether `score` may use `entry`, optionally narrowed to one endpoint path.
///
/// An unhealthy service is always denied. Otherwise the threshold is the
/// matching endpoint's requirement, or the service's when no endpoint
/// matches. If several endpoints share the path (different methods), the
/// strictest one applies.
#[must_use]
pub fn decide(score: &TrustScore, entry: &ServiceCatalogEntry, endpoint_path: Option<&str>) -> AccessDecision {
    let required = required_trust_for(entry, endpoint_path, None);
    if entry.health == HealthStatus::Unhealthy {
        return AccessDecision::unhealthy(required, score.overall());
    }
    AccessDecision::evaluate(required, score.overall())
}

/// Like [`decide`], matching the endpoint on path and HTTP method
#[must_use]
pub fn decide_for_method(
    score: &TrustScore,
    entry: &ServiceCatalogEntry,
    path: &str,
    method: &str,
) -> AccessDecision {
    let required = required_trust_for(entry, Some(path), Some(method));
    if entry.health == HealthStatus::Unhealthy {
        return AccessDecision::unhealthy(required, score.overall());
    }
    AccessDecision::evaluate(required, score.overall())
}

/// Threshold that applies to a request against `entry`
///
/// With a method, an endpoint matching both path and method wins; failing
/// that, path-only matches are considered.
#[must_use]
pub fn required_trust_for(entry: &ServiceCatalogEntry, path: Option<&str>, method: Option<&str>) -> u32 {
    let Some(path) = path else {
        return entry.required_trust;
    };

    let exact = method.and_then(|m| {
        strictest(entry.endpoints.iter().filter(|ep| ep.matches(path, m)))
    });

    exact
        .or_else(|| strictest(entry.endpoints.iter().filter(|ep| ep.matches_path(path))))
        .unwrap_or(entry.required_trust)
}

fn strictest<'a>(endpoints: impl Iterator<Item = &'a Endpoint>) -> Option<u32> {
    endpoints.map(|ep| ep.required_trust).max()
}
