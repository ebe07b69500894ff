//! Access tiers derived from a trust score.

use serde::{Deserialize, Serialize};
use zt_core::TrustScore;

/// Coarse access tier, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustTier {
    /// Below 50
    Denied,
    /// 50 to 69
    ReadOnly,
    /// 70 to 89
    User,
    /// 90 and above
    Admin,
}

impl TrustTier {
    /// Map an overall score onto a tier
    ///
    /// Each band's lower bound belongs to the higher tier.
    #[must_use]
    pub const fn from_overall(overall: u32) -> Self {
        match overall {
            90.. => Self::Admin,
            70..=89 => Self::User,
            50..=69 => Self::ReadOnly,
            _ => Self::Denied,
        }
    }

    /// Classify a computed score
    #[must_use]
    pub const fn classify(score: &TrustScore) -> Self {
        Self::from_overall(score.overall())
    }

    /// Lowest score that lands in this tier
    #[must_use]
    pub const fn min_score(self) -> u32 {
        match self {
            Self::Denied => 0,
            Self::ReadOnly => 50,
            Self::User => 70,
            Self::Admin => 90,
        }
    }

    /// Position in the privilege order (0 = denied)
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Denied => "denied",
            Self::ReadOnly => "read_only",
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for TrustTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
