//! Term grammar
//!
//! A formula is a list of terms joined with ` + `. Each term is one of:
//! - A die term: `<count>d<faces>` with an optional `kh`/`kl` keep modifier
//!   and keep count (`2d20kh`, `4d6kh3`). An omitted count means 1.
//! - A bonus reference: `@<key>`, resolved against the roll context
//! - A signed integer literal: `3`, `-1`

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::RollError;

/// Leading character of a bonus reference
pub const BONUS_SENTINEL: char = '@';

/// Face marker separating dice count from face count
pub const FACE_MARKER: char = 'd';

/// Most dice a single term may roll
pub const MAX_DICE: u32 = 1000;

static DIE_TERM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d*)d(\d+)(?:(kh|kl)(\d*))?$").unwrap());

static BONUS_TERM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)$").unwrap());

static LITERAL_TERM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").unwrap());

/// Which dice survive a keep modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keep {
    /// `kh` - keep the highest dice
    Highest,
    /// `kl` - keep the lowest dice
    Lowest,
}

impl Keep {
    pub fn suffix(&self) -> &'static str {
        match self {
            Keep::Highest => "kh",
            Keep::Lowest => "kl",
        }
    }
}

/// A die term such as `1d20`, `2d20kh` or `4d6kh3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieTerm {
    /// Number of dice to roll
    pub count: u32,
    /// Number of faces per die
    pub faces: u32,
    /// Keep modifier and how many dice it keeps
    pub keep: Option<(Keep, u32)>,
}

impl DieTerm {
    pub fn new(count: u32, faces: u32) -> Self {
        Self {
            count,
            faces,
            keep: None,
        }
    }

    pub fn keep(mut self, keep: Keep, n: u32) -> Self {
        self.keep = Some((keep, n));
        self
    }

    fn parse(term: &str) -> Result<Self, RollError> {
        let lower = term.to_lowercase();
        let caps = DIE_TERM_REGEX
            .captures(&lower)
            .ok_or_else(|| RollError::MalformedTerm(term.to_string()))?;

        let count = match &caps[1] {
            "" => 1,
            digits => digits
                .parse()
                .map_err(|_| RollError::MalformedTerm(term.to_string()))?,
        };
        if count == 0 || count > MAX_DICE {
            return Err(RollError::InvalidDiceCount(term.to_string()));
        }

        let faces: u32 = caps[2]
            .parse()
            .map_err(|_| RollError::MalformedTerm(term.to_string()))?;
        if faces == 0 {
            return Err(RollError::InvalidFaces(term.to_string()));
        }

        let keep = match caps.get(3).map(|m| m.as_str()) {
            None => None,
            Some(kind) => {
                let kind = if kind == "kh" { Keep::Highest } else { Keep::Lowest };
                let n = match caps.get(4).map(|m| m.as_str()).unwrap_or("") {
                    "" => 1,
                    digits => digits
                        .parse()
                        .map_err(|_| RollError::MalformedTerm(term.to_string()))?,
                };
                if n == 0 || n > count {
                    return Err(RollError::InvalidKeep(term.to_string()));
                }
                Some((kind, n))
            }
        };

        Ok(Self { count, faces, keep })
    }
}

impl fmt::Display for DieTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.faces)?;
        match self.keep {
            Some((keep, 1)) => write!(f, "{}", keep.suffix()),
            Some((keep, n)) => write!(f, "{}{}", keep.suffix(), n),
            None => Ok(()),
        }
    }
}

/// A single parsed formula term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Term {
    Dice(DieTerm),
    /// Bonus reference; holds the context key without the sentinel
    Bonus(String),
    Literal(i64),
}

impl Term {
    /// Parse a single term
    pub fn parse(term: &str) -> Result<Self, RollError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(RollError::MalformedTerm(term.to_string()));
        }

        if term.starts_with(BONUS_SENTINEL) {
            let caps = BONUS_TERM_REGEX
                .captures(term)
                .ok_or_else(|| RollError::MalformedTerm(term.to_string()))?;
            return Ok(Term::Bonus(caps[1].to_string()));
        }

        if LITERAL_TERM_REGEX.is_match(term) {
            return term
                .parse()
                .map(Term::Literal)
                .map_err(|_| RollError::MalformedTerm(term.to_string()));
        }

        DieTerm::parse(term).map(Term::Dice)
    }

    /// The die term, if this is one
    pub fn as_dice(&self) -> Option<&DieTerm> {
        match self {
            Term::Dice(d) => Some(d),
            _ => None,
        }
    }
}

impl FromStr for Term {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Term::parse(s)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Dice(d) => write!(f, "{}", d),
            Term::Bonus(key) => write!(f, "{}{}", BONUS_SENTINEL, key),
            Term::Literal(n) => write!(f, "{}", n),
        }
    }
}

/// Strip the bonus sentinel from a raw term, yielding its context key
pub fn bonus_key(term: &str) -> Option<&str> {
    term.trim().strip_prefix(BONUS_SENTINEL)
}

/// Prefix a bare-faces term (`d20`) with an explicit count of one
pub fn normalize_bare_faces(term: &str) -> String {
    let trimmed = term.trim();
    if trimmed.starts_with(FACE_MARKER) || trimmed.starts_with('D') {
        format!("1{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Join raw terms into an additive formula
pub fn join_terms<S: AsRef<str>>(terms: &[S]) -> String {
    terms
        .iter()
        .map(|t| t.as_ref().trim())
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Parse an additive formula back into its terms
pub fn parse_formula(formula: &str) -> Result<Vec<Term>, RollError> {
    if formula.trim().is_empty() {
        return Err(RollError::EmptyFormula);
    }
    formula.split('+').map(Term::parse).collect()
}
