use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Result, ZtError};

/// One of the five canonical trust signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorKind {
    /// Strength of the authenticated identity (MFA, credential age)
    Identity,
    /// Device posture and attestation
    Device,
    /// Behavioral consistency with the subject's history
    Behavior,
    /// Network and geographic location
    Location,
    /// Risk signals; subtracted from the total rather than added
    Risk,
}

impl FactorKind {
    /// All factors in canonical order
    pub const ALL: [Self; 5] = [
        Self::Identity,
        Self::Device,
        Self::Behavior,
        Self::Location,
        Self::Risk,
    ];

    /// Maximum points this factor can carry
    #[must_use]
    pub const fn canonical_max(self) -> u32 {
        match self {
            Self::Identity => 30,
            Self::Device => 25,
            Self::Behavior => 20,
            Self::Location => 15,
            Self::Risk => 10,
        }
    }

    /// Returns true for factors whose value lowers the overall score
    #[must_use]
    pub const fn is_penalty(self) -> bool {
        matches!(self, Self::Risk)
    }

    /// Lowercase factor name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Device => "device",
            Self::Behavior => "behavior",
            Self::Location => "location",
            Self::Risk => "risk",
        }
    }
}

impl std::fmt::Display for FactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactorKind {
    type Err = ZtError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "identity" => Ok(Self::Identity),
            "device" => Ok(Self::Device),
            "behavior" | "behaviour" => Ok(Self::Behavior),
            "location" => Ok(Self::Location),
            "risk" => Ok(Self::Risk),
            other => Err(ZtError::UnknownFactor(other.to_string())),
        }
    }
}

/// A single weighted trust signal
///
/// `weight` is the number of points the factor is worth at full strength and
/// defaults to the canonical maximum. The invariant `value <= max` is checked
/// by [`TrustFactor::validate`] and by every constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustFactor {
    /// Which signal this is
    #[serde(rename = "name")]
    pub kind: FactorKind,

    /// Points the factor is worth at full strength
    pub weight: u32,

    /// Current raw value
    pub value: u32,

    /// Upper bound for `value`
    pub max: u32,
}

impl TrustFactor {
    /// Create a factor with its canonical maximum
    pub fn new(kind: FactorKind, value: u32) -> Result<Self> {
        Self::with_max(kind, value, kind.canonical_max())
    }

    /// Create a factor with an explicit maximum
    pub fn with_max(kind: FactorKind, value: u32, max: u32) -> Result<Self> {
        let factor = Self {
            kind,
            weight: max,
            value,
            max,
        };
        factor.validate()?;
        Ok(factor)
    }

    /// Identity factor (max 30)
    pub fn identity(value: u32) -> Result<Self> {
        Self::new(FactorKind::Identity, value)
    }

    /// Device factor (max 25)
    pub fn device(value: u32) -> Result<Self> {
        Self::new(FactorKind::Device, value)
    }

    /// Behavior factor (max 20)
    pub fn behavior(value: u32) -> Result<Self> {
        Self::new(FactorKind::Behavior, value)
    }

    /// Location factor (max 15)
    pub fn location(value: u32) -> Result<Self> {
        Self::new(FactorKind::Location, value)
    }

    /// Risk penalty (max 10, lower is better)
    pub fn risk(value: u32) -> Result<Self> {
        Self::new(FactorKind::Risk, value)
    }

    /// Factor name as it appears on the wire
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Check the `value <= max` invariant
    pub fn validate(&self) -> Result<()> {
        if self.value > self.max {
            return Err(ZtError::InvalidFactorRange {
                factor: self.kind.to_string(),
                value: self.value,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Signed contribution to the overall score
    #[must_use]
    pub fn contribution(&self) -> i64 {
        let value = i64::from(self.value);
        if self.kind.is_penalty() {
            -value
        } else {
            value
        }
    }
}
