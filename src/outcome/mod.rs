//! Outcome module
//!
//! Derives the results of an action from its main roll:
//! - Critical success/failure of a d20
//! - Weapon damage, including backstab, critical multiplier and versatile grip
//! - Spell targets
//! - The orchestrating [`Roller`]

mod bundle;
mod critical;
mod damage;
mod roller;

pub use bundle::{RollBundle, WeaponDamage};
pub use critical::{classify, Critical, CriticalThresholds, CRITICAL_DIE_FACES};
pub use damage::{damage_dice_count, roll_weapon_damage};
pub use roller::Roller;
