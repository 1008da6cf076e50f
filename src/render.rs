//! Rendering boundary
//!
//! Chat cards and dialogs live in the host. The core hands them a finished
//! [`RollOutcome`] plus an explicit [`RenderContext`]; nothing here reads
//! host-wide state.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::str::FromStr;

use crate::dice::Advantage;
use crate::error::RollError;
use crate::outcome::RollBundle;

/// Who can see a roll
///
/// Unknown modes are carried through untouched; the renderer validates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RollMode {
    #[default]
    Public,
    Private,
    Blind,
    SelfRoll,
    Other(String),
}

impl FromStr for RollMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "public" | "publicroll" => RollMode::Public,
            "private" | "gmroll" => RollMode::Private,
            "blind" | "blindroll" => RollMode::Blind,
            "self" | "selfroll" => RollMode::SelfRoll,
            _ => RollMode::Other(s.to_string()),
        })
    }
}

impl From<String> for RollMode {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(mode) => mode,
            Err(never) => match never {},
        }
    }
}

impl From<RollMode> for String {
    fn from(mode: RollMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for RollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollMode::Public => write!(f, "public"),
            RollMode::Private => write!(f, "private"),
            RollMode::Blind => write!(f, "blind"),
            RollMode::SelfRoll => write!(f, "self"),
            RollMode::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Flavor line shown with a roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Flavor {
    /// Caller-supplied text
    Text { text: String },
    /// Attack or use of a named item
    ItemRoll { item: String },
    /// Casting a spell against a target number
    SpellCast { spell: String, target: i64 },
}

impl Flavor {
    pub fn text(text: impl Into<String>) -> Self {
        Flavor::Text { text: text.into() }
    }
}

/// English fallback; hosts localize from the variant instead
impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Text { text } => write!(f, "{}", text),
            Flavor::ItemRoll { item } => write!(f, "Attack with {}", item),
            Flavor::SpellCast { spell, target } => write!(f, "Cast {} (DC {})", spell, target),
        }
    }
}

/// Who is speaking in the chat message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Speaker {
    pub actor: Option<String>,
    pub alias: Option<String>,
}

/// Options for a single roll
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RollOptions {
    /// Skip the advantage dialog and roll normally
    pub fast_forward: bool,
    pub roll_mode: Option<RollMode>,
    pub flavor: Option<Flavor>,
    pub title: Option<String>,
    /// Number the main total must meet or beat
    pub target: Option<i64>,
    pub speaker: Option<Speaker>,
    /// Post a chat message; `None` uses the configured default
    pub chat_message: Option<bool>,
}

impl RollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fast_forward(mut self) -> Self {
        self.fast_forward = true;
        self
    }

    pub fn with_roll_mode(mut self, mode: RollMode) -> Self {
        self.roll_mode = Some(mode);
        self
    }

    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = Some(flavor);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_target(mut self, target: i64) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_speaker(mut self, speaker: Speaker) -> Self {
        self.speaker = Some(speaker);
        self
    }

    pub fn with_chat_message(mut self, chat: bool) -> Self {
        self.chat_message = Some(chat);
        self
    }
}

/// A finished roll with its resolved options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    pub bundle: RollBundle,
    pub advantage: Advantage,
    /// Options after defaults were applied; `roll_mode` and `chat_message`
    /// are always set
    pub options: RollOptions,
}

impl RollOutcome {
    pub fn roll_mode(&self) -> RollMode {
        self.options.roll_mode.clone().unwrap_or_default()
    }

    pub fn chat_message(&self) -> bool {
        self.options.chat_message.unwrap_or(true)
    }
}

/// Host state a renderer needs, passed in rather than looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderContext {
    pub user: Option<String>,
    pub locale: String,
    pub is_gm: bool,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            user: None,
            locale: "en".to_string(),
            is_gm: false,
        }
    }
}

/// Displays a finished roll
pub trait RollRenderer {
    /// Acknowledgement returned by the host, such as a message id
    type Ack;

    fn render(
        &self,
        outcome: &RollOutcome,
        ctx: &RenderContext,
    ) -> impl Future<Output = Result<Self::Ack, RollError>> + Send;
}

/// Result of rolling and handing off to a renderer
#[derive(Debug, Clone)]
pub struct Rendered<A> {
    pub outcome: RollOutcome,
    /// `None` when no chat message was requested
    pub ack: Option<A>,
}
