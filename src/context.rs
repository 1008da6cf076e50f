//! Roll context
//!
//! Everything a roll may consult besides its terms:
//! - Bonus values, looked up by the key of an `@key` reference
//! - The item being used (weapon, spell, or anything else)
//! - The acting character
//! - Damage options (backstab, extra damage terms)
//! - Critical threshold overrides

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::dice::FACE_MARKER;
use crate::error::RollError;

/// Size of a damage die, written `d8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DieSize(u32);

impl DieSize {
    pub fn new(faces: u32) -> Self {
        Self(faces)
    }

    pub fn faces(&self) -> u32 {
        self.0
    }

    /// Die term rolling `count` dice of this size
    pub fn term(&self, count: u32) -> String {
        format!("{}{}", count, self)
    }
}

impl FromStr for DieSize {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let faces: u32 = trimmed
            .strip_prefix(FACE_MARKER)
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| RollError::MalformedTerm(s.to_string()))?;
        if faces == 0 {
            return Err(RollError::InvalidFaces(s.to_string()));
        }
        Ok(Self(faces))
    }
}

impl TryFrom<String> for DieSize {
    type Error = RollError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DieSize> for String {
    fn from(size: DieSize) -> Self {
        size.to_string()
    }
}

impl fmt::Display for DieSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FACE_MARKER, self.0)
    }
}

/// Weapon damage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Weapon {
    /// Base number of damage dice
    pub num_dice: u32,
    pub one_handed_die: Option<DieSize>,
    pub two_handed_die: Option<DieSize>,
    /// Dice count multiplier on a critical success
    pub crit_multiplier: u32,
    /// Usable with either grip; rolls both damage dice
    pub versatile: bool,
    /// Always wielded with two hands
    pub two_handed: bool,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            num_dice: 1,
            one_handed_die: None,
            two_handed_die: None,
            crit_multiplier: 2,
            versatile: false,
            two_handed: false,
        }
    }
}

impl Weapon {
    /// One-handed weapon with a single damage die
    pub fn one_handed(die: DieSize) -> Self {
        Self {
            one_handed_die: Some(die),
            ..Self::default()
        }
    }

    /// Two-handed weapon with a single damage die
    pub fn two_handed(die: DieSize) -> Self {
        Self {
            two_handed_die: Some(die),
            two_handed: true,
            ..Self::default()
        }
    }

    /// Weapon usable with either grip
    pub fn versatile(one: DieSize, two: DieSize) -> Self {
        Self {
            one_handed_die: Some(one),
            two_handed_die: Some(two),
            versatile: true,
            ..Self::default()
        }
    }

    pub fn with_num_dice(mut self, n: u32) -> Self {
        self.num_dice = n;
        self
    }

    pub fn with_crit_multiplier(mut self, m: u32) -> Self {
        self.crit_multiplier = m;
        self
    }
}

/// Spell casting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub tier: u32,
}

/// What kind of item a roll is made with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Weapon(Weapon),
    Spell(Spell),
    Plain,
}

/// Item a roll is made with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn weapon(name: impl Into<String>, weapon: Weapon) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Weapon(weapon),
        }
    }

    pub fn spell(name: impl Into<String>, tier: u32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Spell(Spell { tier }),
        }
    }

    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Plain,
        }
    }
}

/// Character-level bonuses that feed derived rolls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActorBonuses {
    /// Extra backstab dice; zero when the actor has none
    pub backstab_die: u32,
}

/// The character making the roll
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actor {
    pub name: String,
    pub level: u32,
    pub bonuses: ActorBonuses,
}

impl Actor {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
            bonuses: ActorBonuses::default(),
        }
    }

    pub fn with_backstab_die(mut self, dice: u32) -> Self {
        self.bonuses.backstab_die = dice;
        self
    }
}

/// Data a roll is evaluated against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RollContext {
    /// Bonus values keyed by reference name; nested objects allowed
    pub data: Map<String, Value>,
    pub item: Option<Item>,
    pub actor: Option<Actor>,
    /// Attack is a backstab
    pub backstab: bool,
    /// Extra bonus terms added to every damage roll
    pub damage_parts: Vec<String>,
    /// Critical success threshold override
    pub critical_success: Option<u32>,
    /// Critical failure threshold override
    pub critical_failure: Option<u32>,
}

impl RollContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a bonus value
    pub fn with_bonus(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_backstab(mut self, backstab: bool) -> Self {
        self.backstab = backstab;
        self
    }

    pub fn with_damage_parts<S: Into<String>>(mut self, parts: impl IntoIterator<Item = S>) -> Self {
        self.damage_parts = parts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_critical_thresholds(mut self, success: Option<u32>, failure: Option<u32>) -> Self {
        self.critical_success = success;
        self.critical_failure = failure;
        self
    }

    /// Raw value for a bonus key.
    ///
    /// An exact key wins; otherwise a dotted key walks nested objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(v) = self.data.get(key) {
            return Some(v);
        }
        let mut segments = key.split('.');
        let mut current = self.data.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Numeric value for a bonus key, truncated toward zero.
    ///
    /// Missing keys and non-numeric values yield `None`.
    pub fn bonus(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
    }

    pub fn weapon(&self) -> Option<(&Item, &Weapon)> {
        let item = self.item.as_ref()?;
        match &item.kind {
            ItemKind::Weapon(w) => Some((item, w)),
            _ => None,
        }
    }

    pub fn spell(&self) -> Option<(&Item, &Spell)> {
        let item = self.item.as_ref()?;
        match &item.kind {
            ItemKind::Spell(s) => Some((item, s)),
            _ => None,
        }
    }
}
