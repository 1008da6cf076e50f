//! Weapon damage
//!
//! Damage dice are derived from the weapon and the main roll:
//! - Base count from the weapon, die size from its grip
//! - Backstab adds one die, plus the actor's backstab dice and half level
//! - A critical success multiplies the dice count
//! - Versatile weapons roll a second time with the two-handed die
//!
//! Multipliers and backstab only ever change the dice count; die size and
//! flat bonus terms are untouched.

use tracing::debug;

use super::bundle::{RollBundle, WeaponDamage};
use super::critical::Critical;
use crate::context::{Actor, DieSize, RollContext, Weapon};
use crate::dice::{evaluate, DieSource};
use crate::error::{Grip, RollError};

/// Number of damage dice for an attack
pub fn damage_dice_count(
    weapon: &Weapon,
    actor: Option<&Actor>,
    backstab: bool,
    critical: Critical,
) -> Result<u32, RollError> {
    let overflow = || RollError::Overflow("damage dice count".to_string());
    let mut count = weapon.num_dice;

    if backstab {
        count = count.checked_add(1).ok_or_else(overflow)?;
        if let Some(actor) = actor.filter(|a| a.bonuses.backstab_die > 0) {
            count = actor
                .bonuses
                .backstab_die
                .checked_add(actor.level / 2)
                .and_then(|extra| count.checked_add(extra))
                .ok_or_else(overflow)?;
        }
    }

    if critical == Critical::Success {
        count = count.checked_mul(weapon.crit_multiplier).ok_or_else(overflow)?;
    }

    Ok(count)
}

fn die_for(weapon_name: &str, die: Option<DieSize>, grip: Grip) -> Result<DieSize, RollError> {
    die.ok_or_else(|| RollError::MissingDamageDie {
        weapon: weapon_name.to_string(),
        grip,
    })
}

/// Roll weapon damage for a bundle whose main roll has been classified.
///
/// Returns `None` on a critical failure, or when the weapon rolls no dice
/// (`numDice` or `critMultiplier` of zero).
pub fn roll_weapon_damage<D: DieSource + ?Sized>(
    bundle: &RollBundle,
    weapon_name: &str,
    weapon: &Weapon,
    ctx: &RollContext,
    dice: &mut D,
) -> Result<Option<WeaponDamage>, RollError> {
    let critical = bundle.critical();
    if critical == Critical::Failure {
        debug!(weapon = weapon_name, "critical failure, no damage");
        return Ok(None);
    }

    let count = damage_dice_count(weapon, ctx.actor.as_ref(), ctx.backstab, critical)?;
    if count == 0 {
        debug!(weapon = weapon_name, "weapon rolls no damage dice");
        return Ok(None);
    }
    let size = if weapon.two_handed {
        die_for(weapon_name, weapon.two_handed_die, Grip::TwoHanded)?
    } else {
        die_for(weapon_name, weapon.one_handed_die, Grip::OneHanded)?
    };

    let terms_for = |size: DieSize| {
        let mut terms = vec![size.term(count)];
        terms.extend(ctx.damage_parts.iter().cloned());
        terms
    };

    debug!(
        weapon = weapon_name,
        count,
        die = %size,
        backstab = ctx.backstab,
        ?critical,
        "rolling damage"
    );
    let primary = evaluate(&terms_for(size), ctx, dice)?;

    let secondary = if weapon.versatile {
        let two_handed = die_for(weapon_name, weapon.two_handed_die, Grip::TwoHanded)?;
        Some(evaluate(&terms_for(two_handed), ctx, dice)?)
    } else {
        None
    };

    Ok(Some(WeaponDamage { primary, secondary }))
}
