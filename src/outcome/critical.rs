//! Critical success and failure
//!
//! Only a d20 primary die can be critical. The natural (kept) value of that
//! die is compared against the thresholds; bonuses never count.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::EvaluatedRoll;

/// Faces a primary die must have to be eligible for a critical
pub const CRITICAL_DIE_FACES: u32 = 20;

/// Critical classification of a roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Critical {
    Success,
    Failure,
    #[default]
    None,
}

/// Natural die values that count as critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalThresholds {
    /// At or above: critical success
    pub success: u32,
    /// At or below: critical failure
    pub failure: u32,
}

impl Default for CriticalThresholds {
    fn default() -> Self {
        Self {
            success: 20,
            failure: 1,
        }
    }
}

impl CriticalThresholds {
    /// Replace whichever thresholds are given
    pub fn with_overrides(self, success: Option<u32>, failure: Option<u32>) -> Self {
        Self {
            success: success.unwrap_or(self.success),
            failure: failure.unwrap_or(self.failure),
        }
    }
}

/// Classify a roll. Success is checked before failure.
pub fn classify(roll: &EvaluatedRoll, thresholds: CriticalThresholds) -> Critical {
    let Some(primary) = roll.primary() else {
        return Critical::None;
    };
    if primary.faces != CRITICAL_DIE_FACES {
        return Critical::None;
    }

    let critical = if primary.value >= thresholds.success as i64 {
        Critical::Success
    } else if primary.value <= thresholds.failure as i64 {
        Critical::Failure
    } else {
        Critical::None
    };

    if critical != Critical::None {
        debug!(natural = primary.value, ?critical, "critical roll");
    }
    critical
}
