//! Expression evaluation
//!
//! Turns a term list into an [`EvaluatedRoll`]:
//! 1. Normalize a bare-faces primary term (`d20` becomes `1d20`)
//! 2. Filter the remaining terms against the context
//! 3. Join everything into an additive formula and parse it back
//! 4. Roll each die once and substitute bonus values

use serde::Serialize;
use tracing::{debug, trace};

use super::filter::filter_terms;
use super::source::DieSource;
use super::term::{join_terms, normalize_bare_faces, parse_formula, DieTerm, Keep, Term};
use crate::context::RollContext;
use crate::error::RollError;

/// A single die as rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DieResult {
    pub value: u32,
    /// Counted toward the total (false when discarded by `kh`/`kl`)
    pub kept: bool,
}

/// Outcome of one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TermResult {
    Dice {
        term: DieTerm,
        results: Vec<DieResult>,
        total: i64,
    },
    Bonus {
        key: String,
        value: i64,
    },
    Literal {
        value: i64,
    },
}

impl TermResult {
    pub fn total(&self) -> i64 {
        match self {
            TermResult::Dice { total, .. } => *total,
            TermResult::Bonus { value, .. } => *value,
            TermResult::Literal { value } => *value,
        }
    }
}

/// The leading die of a roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryDie {
    pub faces: u32,
    /// Kept dice only, bonuses excluded
    pub value: i64,
}

/// Result of evaluating one term list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedRoll {
    formula: String,
    resolved_formula: String,
    total: i64,
    terms: Vec<TermResult>,
    primary: Option<PrimaryDie>,
}

impl EvaluatedRoll {
    /// Formula as written, bonus references intact (`1d20 + @itemBonus`)
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Formula with bonus references replaced by their values (`1d20 + 3`)
    pub fn resolved_formula(&self) -> &str {
        &self.resolved_formula
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn terms(&self) -> &[TermResult] {
        &self.terms
    }

    /// The leading die term, if the roll starts with one
    pub fn primary(&self) -> Option<PrimaryDie> {
        self.primary
    }

    /// Every individual die rolled, in order
    pub fn dice(&self) -> impl Iterator<Item = &DieResult> {
        self.terms.iter().flat_map(|t| match t {
            TermResult::Dice { results, .. } => results.as_slice(),
            _ => &[] as &[DieResult],
        })
    }
}

/// Evaluate a term list against a context
pub fn evaluate<S, D>(terms: &[S], ctx: &RollContext, dice: &mut D) -> Result<EvaluatedRoll, RollError>
where
    S: AsRef<str>,
    D: DieSource + ?Sized,
{
    let (first, rest) = terms.split_first().ok_or(RollError::EmptyFormula)?;

    let mut parts = vec![normalize_bare_faces(first.as_ref())];
    parts.extend(filter_terms(rest, ctx));

    let formula = join_terms(&parts);
    let parsed = parse_formula(&formula)?;

    let mut results = Vec::with_capacity(parsed.len());
    let mut resolved = Vec::with_capacity(parsed.len());
    for term in &parsed {
        let result = match term {
            Term::Dice(die) => {
                resolved.push(die.to_string());
                roll_die_term(die, dice)
            }
            Term::Bonus(key) => {
                let value = ctx.bonus(key).unwrap_or(0);
                resolved.push(value.to_string());
                TermResult::Bonus {
                    key: key.clone(),
                    value,
                }
            }
            Term::Literal(value) => {
                resolved.push(value.to_string());
                TermResult::Literal { value: *value }
            }
        };
        results.push(result);
    }

    let total = results
        .iter()
        .map(TermResult::total)
        .try_fold(0i64, i64::checked_add)
        .ok_or_else(|| RollError::Overflow(formula.clone()))?;
    let primary = match results.first() {
        Some(TermResult::Dice { term, total, .. }) => Some(PrimaryDie {
            faces: term.faces,
            value: *total,
        }),
        _ => None,
    };

    let roll = EvaluatedRoll {
        formula,
        resolved_formula: join_terms(&resolved),
        total,
        terms: results,
        primary,
    };
    debug!(
        formula = %roll.formula,
        resolved = %roll.resolved_formula,
        total = roll.total,
        "evaluated roll"
    );
    Ok(roll)
}

fn roll_die_term<D: DieSource + ?Sized>(die: &DieTerm, dice: &mut D) -> TermResult {
    let values: Vec<u32> = (0..die.count).map(|_| dice.roll(die.faces)).collect();
    trace!(term = %die, ?values, "rolled dice");

    let mut kept = vec![true; values.len()];
    if let Some((keep, n)) = die.keep {
        let mut order: Vec<usize> = (0..values.len()).collect();
        match keep {
            Keep::Highest => order.sort_by(|&a, &b| values[b].cmp(&values[a])),
            Keep::Lowest => order.sort_by(|&a, &b| values[a].cmp(&values[b])),
        }
        kept = vec![false; values.len()];
        for &i in order.iter().take(n as usize) {
            kept[i] = true;
        }
    }

    let results: Vec<DieResult> = values
        .iter()
        .zip(&kept)
        .map(|(&value, &kept)| DieResult { value, kept })
        .collect();
    let total = results
        .iter()
        .filter(|r| r.kept)
        .map(|r| r.value as i64)
        .sum();

    TermResult::Dice {
        term: *die,
        results,
        total,
    }
}
