//! Roll errors

use thiserror::Error;

/// Errors raised while evaluating or orchestrating a roll
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollError {
    #[error("empty dice formula")]
    EmptyFormula,

    #[error("malformed term: '{0}'")]
    MalformedTerm(String),

    #[error("dice count must be between 1 and {max}: '{0}'", max = crate::dice::MAX_DICE)]
    InvalidDiceCount(String),

    #[error("die faces must be at least 1: '{0}'")]
    InvalidFaces(String),

    #[error("keep count must be between 1 and the dice count: '{0}'")]
    InvalidKeep(String),

    #[error("arithmetic overflow in '{0}'")]
    Overflow(String),

    #[error("weapon '{weapon}' has no {grip} damage die")]
    MissingDamageDie { weapon: String, grip: Grip },

    #[error("render failed: {0}")]
    Render(String),
}

/// Which hand configuration a damage die belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grip {
    OneHanded,
    TwoHanded,
}

impl std::fmt::Display for Grip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grip::OneHanded => write!(f, "one-handed"),
            Grip::TwoHanded => write!(f, "two-handed"),
        }
    }
}
