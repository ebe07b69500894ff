//! Built-in service catalog for a local zero-trust deployment.

use tracing::info;
use zt_core::{Endpoint, Result, ServiceCatalogEntry};

use crate::registry::ServiceRegistry;

/// Gateway, identity provider and the three backend services of a local
/// deployment, with their per-endpoint trust thresholds.
#[must_use]
pub fn default_catalog() -> Vec<ServiceCatalogEntry> {
    vec![
        ServiceCatalogEntry::new("api-gateway", "http://localhost:8080")
            .with_endpoint(Endpoint::new("GET", "/health", "Health check", 0))
            .with_endpoint(Endpoint::new("POST", "/api/v1/auth/login", "User authentication", 0))
            .with_endpoint(Endpoint::new("GET", "/api/v1/trust-score", "Get trust score", 25))
            .with_endpoint(Endpoint::new("GET", "/api/v1/protected", "Protected resource", 50))
            .with_metadata("type", "gateway")
            .with_metadata("version", "1.0.0"),
        ServiceCatalogEntry::new("keycloak", "http://localhost:8082")
            .with_endpoint(Endpoint::new("GET", "/admin", "Admin console", 75))
            .with_endpoint(Endpoint::new("GET", "/realms/zerotrust-test", "Realm info", 0))
            .with_metadata("type", "identity-provider")
            .with_metadata("version", "22.0.5"),
        ServiceCatalogEntry::new("user-service", "http://localhost:8081")
            .with_required_trust(25)
            .with_endpoint(
                Endpoint::new("GET", "/api/users", "List users", 25).with_scopes(["users:read"]),
            )
            .with_endpoint(
                Endpoint::new("GET", "/api/users/{id}", "Get user", 25).with_scopes(["users:read"]),
            )
            .with_endpoint(
                Endpoint::new("PUT", "/api/users/{id}", "Update user", 50)
                    .with_scopes(["users:write"]),
            )
            .with_metadata("type", "microservice")
            .with_metadata("domain", "user-management"),
        ServiceCatalogEntry::new("admin-service", "http://localhost:8083")
            .with_required_trust(75)
            .with_endpoint(
                Endpoint::new("DELETE", "/api/admin/users", "Delete users", 90)
                    .with_scopes(["admin:write"]),
            )
            .with_endpoint(
                Endpoint::new("GET", "/api/admin/audit", "View audit logs", 75)
                    .with_scopes(["admin:read"]),
            )
            .with_endpoint(
                Endpoint::new("PUT", "/api/admin/config", "Update configuration", 90)
                    .with_scopes(["admin:write"]),
            )
            .with_metadata("type", "microservice")
            .with_metadata("domain", "administration"),
        ServiceCatalogEntry::new("audit-service", "http://localhost:8084")
            .with_required_trust(50)
            .with_endpoint(
                Endpoint::new("GET", "/api/audit/logs", "Get audit logs", 50)
                    .with_scopes(["audit:read"]),
            )
            .with_endpoint(
                Endpoint::new("POST", "/api/audit/export", "Export audit data", 75)
                    .with_scopes(["audit:export"]),
            )
            .with_metadata("type", "microservice")
            .with_metadata("domain", "compliance"),
    ]
}

/// Register every [`default_catalog`] entry, returning how many were added
pub fn bootstrap_defaults(registry: &ServiceRegistry) -> Result<usize> {
    let entries = default_catalog();
    let count = entries.len();
    for entry in entries {
        registry.register(entry)?;
    }
    info!(count, "registered default service catalog");
    Ok(count)
}
