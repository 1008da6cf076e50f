//! Roll bundles
//!
//! A [`RollBundle`] collects every roll one action produced: the main roll,
//! its critical classification, and any weapon damage derived from it.

use serde::Serialize;

use super::critical::Critical;
use crate::dice::EvaluatedRoll;

/// Damage rolls derived from a weapon attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDamage {
    pub primary: EvaluatedRoll,
    /// Two-handed damage of a versatile weapon
    pub secondary: Option<EvaluatedRoll>,
}

/// All rolls for one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollBundle {
    main: EvaluatedRoll,
    critical: Critical,
    primary_damage: Option<EvaluatedRoll>,
    secondary_damage: Option<EvaluatedRoll>,
    success: Option<bool>,
}

impl RollBundle {
    pub(crate) fn new(main: EvaluatedRoll, critical: Critical) -> Self {
        Self {
            main,
            critical,
            primary_damage: None,
            secondary_damage: None,
            success: None,
        }
    }

    pub(crate) fn with_damage(mut self, damage: Option<WeaponDamage>) -> Self {
        // Critical failures never carry damage
        if self.critical == Critical::Failure {
            return self;
        }
        if let Some(damage) = damage {
            self.primary_damage = Some(damage.primary);
            self.secondary_damage = damage.secondary;
        }
        self
    }

    pub fn main(&self) -> &EvaluatedRoll {
        &self.main
    }

    pub fn critical(&self) -> Critical {
        self.critical
    }

    pub fn primary_damage(&self) -> Option<&EvaluatedRoll> {
        self.primary_damage.as_ref()
    }

    pub fn secondary_damage(&self) -> Option<&EvaluatedRoll> {
        self.secondary_damage.as_ref()
    }

    /// Whether the main roll met its target, once one is known
    pub fn success(&self) -> Option<bool> {
        self.success
    }

    /// Compare the main total against a target and record the result
    pub fn resolve_target(&mut self, target: i64) -> bool {
        let success = self.main.total() >= target;
        self.success = Some(success);
        success
    }
}
