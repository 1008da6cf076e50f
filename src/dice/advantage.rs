//! Advantage and disadvantage
//!
//! Advantage rolls the primary die twice and keeps the higher result;
//! disadvantage keeps the lower. Only a single-die primary term is rewritten.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::term::{DieTerm, Keep, Term};

/// Advantage state of a roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Advantage {
    Advantage,
    #[default]
    Normal,
    Disadvantage,
}

impl Advantage {
    /// Map a signed indicator: positive is advantage, negative disadvantage
    pub fn from_indicator(indicator: i64) -> Self {
        match indicator {
            i if i > 0 => Advantage::Advantage,
            i if i < 0 => Advantage::Disadvantage,
            _ => Advantage::Normal,
        }
    }

    /// Signed indicator: 1, 0 or -1
    pub fn indicator(&self) -> i64 {
        match self {
            Advantage::Advantage => 1,
            Advantage::Normal => 0,
            Advantage::Disadvantage => -1,
        }
    }

    fn keep(&self) -> Option<Keep> {
        match self {
            Advantage::Advantage => Some(Keep::Highest),
            Advantage::Normal => None,
            Advantage::Disadvantage => Some(Keep::Lowest),
        }
    }
}

/// Rewrite the primary term for advantage or disadvantage.
///
/// Terms whose primary is not a plain single die come back unchanged.
pub fn apply_advantage<S: AsRef<str>>(terms: &[S], advantage: Advantage) -> Vec<String> {
    let mut out: Vec<String> = terms.iter().map(|t| t.as_ref().to_string()).collect();

    let Some(keep) = advantage.keep() else {
        return out;
    };
    let Some(first) = out.first_mut() else {
        return out;
    };

    let primary = Term::parse(first).ok();
    match primary.as_ref().and_then(Term::as_dice) {
        Some(&DieTerm {
            count: 1,
            faces,
            keep: None,
        }) => {
            let rewritten = DieTerm::new(2, faces).keep(keep, 1).to_string();
            trace!(from = %first, to = %rewritten, "applying {:?}", advantage);
            *first = rewritten;
        }
        _ => {
            trace!(term = %first, "primary term not eligible for {:?}", advantage);
        }
    }

    out
}
