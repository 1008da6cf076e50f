//! Dice expression module
//!
//! Implements the formula side of a roll:
//! - Term grammar (`1d20`, `2d20kh`, `@bonus`, `3`)
//! - Filtering of bonus references that contribute nothing
//! - Advantage/disadvantage rewriting of the primary die
//! - Evaluation against a roll context with a pluggable die source

mod advantage;
mod evaluate;
mod filter;
mod source;
mod term;

pub use advantage::{apply_advantage, Advantage};
pub use evaluate::{evaluate, DieResult, EvaluatedRoll, PrimaryDie, TermResult};
pub use filter::filter_terms;
pub use source::{DieSource, RngDice, ScriptedDice};
pub use term::{
    bonus_key, join_terms, normalize_bare_faces, parse_formula, DieTerm, Keep, Term,
    BONUS_SENTINEL, FACE_MARKER, MAX_DICE,
};
