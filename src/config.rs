use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::AssetKind;

pub const ASSETS_VAR: &str = "MEMORAMA_ASSETS";
pub const IMAGE_DIR_VAR: &str = "MEMORAMA_IMAGE_DIR";
pub const MISMATCH_DELAY_VAR: &str = "MEMORAMA_MISMATCH_DELAY_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read game config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown card asset kind [{0}], expected `glyph` or `image`")]
    UnknownAssetKind(String),
    #[error("{key} must be a whole number of milliseconds, got [{value}]")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// How long a non-matching pair stays visible.
    pub mismatch_delay_ms: u64,
    pub tick_interval_ms: u64,
    pub assets: AssetKind,
    /// Where image faces are looked up when `assets` is `image`.
    pub image_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mismatch_delay_ms: 1000,
            tick_interval_ms: 1000,
            assets: AssetKind::Glyph,
            image_dir: PathBuf::from("cards"),
        }
    }
}

impl GameConfig {
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mismatch_delay_ms == 0 {
            return Err(ConfigError::ZeroDuration("mismatch_delay_ms"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("tick_interval_ms"));
        }
        Ok(())
    }

    /// Parses a JSON object; missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `MEMORAMA_*` variables as returned by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = GameConfig::default();
        if let Some(kind) = lookup(ASSETS_VAR) {
            config.assets = kind.parse()?;
        }
        if let Some(dir) = lookup(IMAGE_DIR_VAR) {
            config.image_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(MISMATCH_DELAY_VAR) {
            config.mismatch_delay_ms = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: MISMATCH_DELAY_VAR,
                value: raw.clone(),
            })?;
        }
        config.validate()?;
        Ok(config)
    }
}
