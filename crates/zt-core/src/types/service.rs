use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Last known liveness of a registered service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Not probed yet
    #[default]
    Unknown,
    /// Last probe answered with a 2xx status
    Healthy,
    /// Last probe failed, timed out or answered with a non-2xx status
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Healthy => write!(f, "healthy"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// An action exposed by a service, with its own trust threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Path, optionally with `{param}` segments
    pub path: String,

    /// HTTP method
    pub method: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Minimum trust score needed to call this endpoint
    #[serde(rename = "trust_level_required", alias = "required_trust", default)]
    pub required_trust: u32,

    /// OAuth-style scopes the endpoint expects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
}

impl Endpoint {
    /// Create an endpoint
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        description: impl Into<String>,
        required_trust: u32,
    ) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            description: description.into(),
            required_trust,
            scopes: Vec::new(),
        }
    }

    /// Attach required scopes
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Match a concrete request path against this endpoint's path
    ///
    /// A `{param}` segment matches any single non-empty segment. Trailing
    /// slashes are ignored.
    #[must_use]
    pub fn matches_path(&self, path: &str) -> bool {
        let pattern: Vec<&str> = self.path.trim_end_matches('/').split('/').collect();
        let actual: Vec<&str> = path.trim_end_matches('/').split('/').collect();

        pattern.len() == actual.len()
            && pattern.iter().zip(&actual).all(|(p, a)| {
                if p.starts_with('{') && p.ends_with('}') {
                    !a.is_empty()
                } else {
                    p == a
                }
            })
    }

    /// Match both path and method (method compared case-insensitively)
    #[must_use]
    pub fn matches(&self, path: &str, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method) && self.matches_path(path)
    }
}

/// A registered backend service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalogEntry {
    /// Unique registry key
    pub name: String,

    /// Base URL; health probes go to `{base_url}{health_path}`
    #[serde(rename = "url", alias = "base_url")]
    pub base_url: String,

    /// Minimum trust score needed to see or use the service
    #[serde(rename = "trust_level_required", alias = "required_trust", default)]
    pub required_trust: u32,

    /// Actions the service exposes
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    /// Free-form labels
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Last probe outcome; owned by the registry
    #[serde(rename = "status", default)]
    pub health: HealthStatus,

    /// When the last probe completed
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
}

impl ServiceCatalogEntry {
    /// Create an entry with no endpoints and trust requirement 0
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            required_trust: 0,
            endpoints: Vec::new(),
            metadata: HashMap::new(),
            health: HealthStatus::Unknown,
            last_checked: None,
        }
    }

    /// Set the service-level trust requirement
    #[must_use]
    pub const fn with_required_trust(mut self, trust: u32) -> Self {
        self.required_trust = trust;
        self
    }

    /// Add an endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Add a metadata label
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// URL the health probe should hit
    #[must_use]
    pub fn health_url(&self, health_path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if health_path.starts_with('/') {
            format!("{base}{health_path}")
        } else {
            format!("{base}/{health_path}")
        }
    }

    /// Returns true if the last probe succeeded
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.health == HealthStatus::Healthy
    }
}
