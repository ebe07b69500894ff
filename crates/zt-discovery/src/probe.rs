//! Health probes for registered services.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::debug;
use zt_core::{HealthStatus, Result, ZtError};

/// Default health path appended to a service's base URL
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Default per-probe timeout
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks whether a service is alive.
///
/// Implementations must not fail: every error is folded into
/// [`HealthStatus::Unhealthy`].
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probe the service at `base_url`
    async fn check(&self, base_url: &str) -> HealthStatus;
}

/// HTTP GET probe: any 2xx answer is healthy
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    http: HttpClient,
    health_path: String,
}

impl HttpHealthProbe {
    /// Create a probe with default path and timeout
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> HttpHealthProbeBuilder {
        HttpHealthProbeBuilder::new()
    }

    /// Full URL probed for `base_url`
    #[must_use]
    pub fn health_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.health_path)
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn check(&self, base_url: &str) -> HealthStatus {
        let url = self.health_url(base_url);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(url = %url, status = %response.status(), "health probe succeeded");
                HealthStatus::Healthy
            }
            Ok(response) => {
                debug!(url = %url, status = %response.status(), "health probe returned failure status");
                HealthStatus::Unhealthy
            }
            Err(e) => {
                debug!(url = %url, error = %e, timeout = e.is_timeout(), "health probe failed");
                HealthStatus::Unhealthy
            }
        }
    }
}

/// Builder for configuring an [`HttpHealthProbe`]
pub struct HttpHealthProbeBuilder {
    health_path: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpHealthProbeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpHealthProbeBuilder {
    /// Create a builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            timeout: DEFAULT_PROBE_TIMEOUT,
            user_agent: format!("zt-discovery/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the path appended to each base URL
    #[must_use]
    pub fn health_path(mut self, path: impl Into<String>) -> Self {
        self.health_path = path.into();
        self
    }

    /// Set the per-probe timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the probe
    pub fn build(self) -> Result<HttpHealthProbe> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| ZtError::Http(format!("failed to build HTTP client: {e}")))?;

        let health_path = if self.health_path.starts_with('/') {
            self.health_path
        } else {
            format!("/{}", self.health_path)
        };

        Ok(HttpHealthProbe { http, health_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn health_url_normalizes_slashes() {
        let probe = HttpHealthProbe::builder().health_path("healthz").build().unwrap();
        assert_eq!(probe.health_url("http://svc:8080/"), "http://svc:8080/healthz");
        assert_eq!(probe.health_url("http://svc:8080"), "http://svc:8080/healthz");
    }

    #[tokio::test]
    async fn any_2xx_is_healthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let probe = HttpHealthProbe::new().unwrap();
        assert_eq!(probe.check(&server.uri()).await, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn server_error_is_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let probe = HttpHealthProbe::new().unwrap();
        assert_eq!(probe.check(&server.uri()).await, HealthStatus::Unhealthy);
    }

    #[tokio::test]
    async fn timeout_is_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let probe = HttpHealthProbe::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        assert_eq!(probe.check(&server.uri()).await, HealthStatus::Unhealthy);
    }

    #[tokio::test]
    async fn connection_refused_is_unhealthy() {
        let probe = HttpHealthProbe::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap();
        // Port 9 (discard) is closed on test hosts.
        assert_eq!(probe.check("http://127.0.0.1:9").await, HealthStatus::Unhealthy);
    }
}
