//! Roll settings
//!
//! Defaults the host would otherwise supply implicitly. Layered with figment:
//! built-in defaults, then an optional TOML file, then `ROLLCORE_*`
//! environment variables (`__` separates nested keys, e.g.
//! `ROLLCORE_CRITICAL__SUCCESS=19`).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::outcome::CriticalThresholds;
use crate::render::RollMode;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ROLLCORE_";

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid roll settings: {0}")]
    Figment(#[from] figment::Error),
}

/// Host-level roll defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollSettings {
    /// Visibility used when a roll does not pick one
    pub default_roll_mode: RollMode,
    /// Critical thresholds used when the context has no overrides
    pub critical: CriticalThresholds,
    /// Added to a spell's tier to get its casting target
    pub spell_target_base: i64,
    /// Post a chat message unless the roll says otherwise
    pub chat_message: bool,
}

impl Default for RollSettings {
    fn default() -> Self {
        Self {
            default_roll_mode: RollMode::Public,
            critical: CriticalThresholds::default(),
            spell_target_base: 10,
            chat_message: true,
        }
    }
}

impl RollSettings {
    /// Layered provider: defaults, optional file, environment
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(RollSettings::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load settings from the layered provider
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Ok(Self::figment(path).extract()?)
    }
}
