use thiserror::Error;

/// Result type alias for zerotrust operations
pub type Result<T> = std::result::Result<T, ZtError>;

/// Errors that can occur in the trust engine and service registry
///
/// Access denials are not errors: they are reported through
/// [`AccessDecision`](crate::AccessDecision).
#[derive(Error, Debug)]
pub enum ZtError {
    /// A trust factor value lies outside `0..=max`
    #[error("invalid factor range: {factor} = {value}, max {max}")]
    InvalidFactorRange {
        /// Factor name
        factor: String,
        /// Supplied value
        value: u32,
        /// Declared maximum
        max: u32,
    },

    /// The same factor was supplied twice in one evaluation
    #[error("duplicate trust factor: {0}")]
    DuplicateFactor(String),

    /// Decay rate is negative or not a finite number
    #[error("invalid decay rate: {0}")]
    InvalidDecayRate(f64),

    /// Unknown trust factor name
    #[error("unknown trust factor: {0}")]
    UnknownFactor(String),

    /// Trust score violates its own invariants (e.g. decoded from untrusted input)
    #[error("invalid trust score: {0}")]
    InvalidScore(String),

    /// Service entry rejected at registration
    #[error("invalid service entry: {0}")]
    InvalidEntry(String),

    /// Service is not registered
    #[error("service not found: {service}")]
    NotFound {
        /// Name that was looked up
        service: String,
    },

    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Signal collection from an external source failed
    #[error("signal source error: {0}")]
    Signal(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ZtError {
    /// Returns true if the caller supplied data that violates an invariant
    ///
    /// These are never retried by the engine; the caller must resubmit.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFactorRange { .. }
                | Self::DuplicateFactor(_)
                | Self::InvalidDecayRate(_)
                | Self::UnknownFactor(_)
                | Self::InvalidScore(_)
                | Self::InvalidEntry(_)
        )
    }

    /// Returns true if the error is a lookup miss
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status code the routing layer should answer with
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidFactorRange { .. }
            | Self::DuplicateFactor(_)
            | Self::InvalidDecayRate(_)
            | Self::UnknownFactor(_)
            | Self::InvalidScore(_)
            | Self::InvalidEntry(_)
            | Self::Json(_) => 400,
            Self::Http(_) | Self::Signal(_) => 502,
            Self::Config(_) | Self::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let err = ZtError::InvalidEntry("service name is required".into());
        assert!(err.is_client_error());
        assert_eq!(err.status_code(), 400);

        let err = ZtError::InvalidFactorRange {
            factor: "device".into(),
            value: 26,
            max: 25,
        };
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "invalid factor range: device = 26, max 25");
    }

    #[test]
    fn not_found_is_not_a_client_error() {
        let err = ZtError::NotFound {
            service: "billing".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_client_error());
        assert_eq!(err.status_code(), 404);
    }
}
