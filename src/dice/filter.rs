//! Term filter
//!
//! Drops bonus references that would contribute nothing: the key is missing,
//! the value is not a number, or the value is zero. Die terms pass through
//! untouched. The primary term is never handed to the filter; callers put it
//! back in front of the filtered list themselves.

use tracing::trace;

use super::term::bonus_key;
use crate::context::RollContext;

/// Keep the terms that contribute to the roll
pub fn filter_terms<S: AsRef<str>>(terms: &[S], ctx: &RollContext) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.as_ref())
        .filter(|term| {
            let keep = contributes(term, ctx);
            if !keep {
                trace!(term, "dropping term");
            }
            keep
        })
        .map(|term| term.trim().to_string())
        .collect()
}

fn contributes(term: &str, ctx: &RollContext) -> bool {
    if let Some(key) = bonus_key(term) {
        return ctx.bonus(key).is_some_and(|v| v != 0);
    }
    match term.trim().parse::<i64>() {
        Ok(n) => n != 0,
        Err(_) => true,
    }
}
