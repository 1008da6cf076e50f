//! rollcore - d20 roll evaluation and outcome engine
//!
//! Evaluates dice formulas built from `<N>d<F>[kh|kl]` terms and `@bonus`
//! references, then derives critical results, weapon damage and spell
//! targets. Rendering and the advantage dialog are left to the host behind
//! the [`render::RollRenderer`] and [`dialog::ChoiceDialog`] traits.

pub mod config;
pub mod context;
pub mod dialog;
pub mod dice;
pub mod error;
pub mod outcome;
pub mod render;

pub use config::{RollSettings, SettingsError};
pub use context::{Actor, ActorBonuses, DieSize, Item, ItemKind, RollContext, Spell, Weapon};
pub use dialog::{ChannelDialog, ChoiceDialog, DialogPrompt, PendingChoice, RollChoice};
pub use dice::{Advantage, DieSource, EvaluatedRoll, RngDice, ScriptedDice};
pub use error::{Grip, RollError};
pub use outcome::{Critical, CriticalThresholds, RollBundle, Roller};
pub use render::{Flavor, RenderContext, Rendered, RollMode, RollOptions, RollOutcome, RollRenderer, Speaker};
