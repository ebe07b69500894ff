use serde::{Deserialize, Serialize};

/// Why an access decision came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Trust met the threshold
    Ok,
    /// Trust below the threshold
    InsufficientTrust,
    /// Service is not registered
    ServiceUnknown,
    /// Service failed its last health probe
    ServiceUnhealthy,
    /// Trust score is past its validity window and must be re-evaluated
    ScoreExpired,
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::InsufficientTrust => write!(f, "insufficient trust"),
            Self::ServiceUnknown => write!(f, "service unknown"),
            Self::ServiceUnhealthy => write!(f, "service unhealthy"),
            Self::ScoreExpired => write!(f, "score expired"),
        }
    }
}

/// Outcome of one access check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether access is allowed
    pub granted: bool,

    /// Threshold that applied
    pub required_trust: u32,

    /// Caller's trust score
    pub actual_trust: u32,

    /// Why
    pub reason: DecisionReason,
}

impl AccessDecision {
    /// Compare trust against a threshold
    #[must_use]
    pub const fn evaluate(required_trust: u32, actual_trust: u32) -> Self {
        let granted = actual_trust >= required_trust;
        Self {
            granted,
            required_trust,
            actual_trust,
            reason: if granted {
                DecisionReason::Ok
            } else {
                DecisionReason::InsufficientTrust
            },
        }
    }

    /// Denial for a service that is down
    #[must_use]
    pub const fn unhealthy(required_trust: u32, actual_trust: u32) -> Self {
        Self {
            granted: false,
            required_trust,
            actual_trust,
            reason: DecisionReason::ServiceUnhealthy,
        }
    }

    /// Denial for a score presented after its validity window closed
    #[must_use]
    pub const fn expired(required_trust: u32, actual_trust: u32) -> Self {
        Self {
            granted: false,
            required_trust,
            actual_trust,
            reason: DecisionReason::ScoreExpired,
        }
    }

    /// Denial for a service name the registry does not know
    #[must_use]
    pub const fn unknown(actual_trust: u32) -> Self {
        Self {
            granted: false,
            required_trust: 0,
            actual_trust,
            reason: DecisionReason::ServiceUnknown,
        }
    }

    /// HTTP status the routing layer should answer with
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self.reason {
            DecisionReason::Ok => 200,
            DecisionReason::ScoreExpired => 401,
            DecisionReason::InsufficientTrust => 403,
            DecisionReason::ServiceUnknown => 404,
            DecisionReason::ServiceUnhealthy => 503,
        }
    }

    /// Points missing to reach the threshold
    #[must_use]
    pub const fn shortfall(&self) -> u32 {
        self.required_trust.saturating_sub(self.actual_trust)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let d = AccessDecision::evaluate(50, 50);
        assert!(d.granted);
        assert_eq!(d.reason, DecisionReason::Ok);
        assert_eq!(d.status_code(), 200);

        let d = AccessDecision::evaluate(50, 45);
        assert!(!d.granted);
        assert_eq!(d.reason, DecisionReason::InsufficientTrust);
        assert_eq!(d.status_code(), 403);
        assert_eq!(d.shortfall(), 5);
    }

    #[test]
    fn boundary_statuses() {
        assert_eq!(AccessDecision::unknown(90).status_code(), 404);
        assert_eq!(AccessDecision::unhealthy(0, 90).status_code(), 503);
        assert!(!AccessDecision::unhealthy(0, 90).granted);
        assert_eq!(AccessDecision::expired(50, 90).status_code(), 401);
        assert!(!AccessDecision::expired(0, 90).granted);
    }

    #[test]
    fn reason_serializes_snake_case() {
        let json = serde_json::to_value(AccessDecision::evaluate(75, 60)).unwrap();
        assert_eq!(json["reason"], "insufficient_trust");
        assert_eq!(json["required_trust"], 75);
        assert_eq!(json["actual_trust"], 60);
    }
}
