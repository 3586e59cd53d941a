use crate::danger::Danger;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Defender strength must be a positive representable number, got {0}")]
    InvalidDefenderStrength(f32),
}

/// Tuning for turning accumulated danger into a reinforcement request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy", into = "RawPolicy")]
pub struct AssessmentPolicy {
    /// Danger one defending army can absorb. Never zero.
    defender_strength: Danger,
    /// Upper bound on armies requested for a single city.
    max_reinforcements: u32,
}

#[derive(Serialize, Deserialize)]
struct RawPolicy {
    defender_strength: f32,
    max_reinforcements: u32,
}

impl TryFrom<RawPolicy> for AssessmentPolicy {
    type Error = PolicyError;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        Self::new(raw.defender_strength, raw.max_reinforcements)
    }
}

impl From<AssessmentPolicy> for RawPolicy {
    fn from(policy: AssessmentPolicy) -> Self {
        Self {
            defender_strength: policy.defender_strength.to_f32(),
            max_reinforcements: policy.max_reinforcements,
        }
    }
}

impl AssessmentPolicy {
    pub fn new(defender_strength: f32, max_reinforcements: u32) -> Result<Self, PolicyError> {
        match Danger::try_from_f32(defender_strength) {
            Some(strength) if !strength.is_zero() => Ok(Self {
                defender_strength: strength,
                max_reinforcements,
            }),
            _ => Err(PolicyError::InvalidDefenderStrength(defender_strength)),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn defender_strength(&self) -> Danger {
        self.defender_strength
    }

    pub fn max_reinforcements(&self) -> u32 {
        self.max_reinforcements
    }

    /// Armies needed on top of `defenders` to absorb `danger`, capped.
    pub fn reinforcements_for(&self, danger: Danger, defenders: u32) -> u32 {
        let strength = i128::from(self.defender_strength.raw());
        let excess = i128::from(danger.raw()) - strength * i128::from(defenders);
        if excess <= 0 {
            return 0;
        }
        let needed = (excess + strength - 1) / strength;
        u32::try_from(needed)
            .unwrap_or(u32::MAX)
            .min(self.max_reinforcements)
    }
}

impl Default for AssessmentPolicy {
    fn default() -> Self {
        Self {
            defender_strength: Danger::ONE,
            // A full stack.
            max_reinforcements: 8,
        }
    }
}
