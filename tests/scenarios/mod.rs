//! Scenario tests
//!
//! - Checks: plain d20 checks with bonuses, advantage and targets
//! - Weapon: attacks with damage, criticals, backstab and versatile grips
//! - Spell: casting against tier-derived targets
//! - Dialog: advantage choice, dismissal and fast-forward

pub mod checks;
pub mod dialog;
