//! Turns symbol ids into something a board can draw.
//!
//! The game only ever compares symbol ids. Whether a card shows an emoji or a
//! picture is decided here, once, so a single board serves both looks.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::game::{Card, glyph_for};

pub const BACK_GLYPH: &str = "❓";
pub const BACK_IMAGE: &str = "back.png";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Glyph,
    Image,
}

impl FromStr for AssetKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "glyph" | "emoji" => Ok(AssetKind::Glyph),
            "image" => Ok(AssetKind::Image),
            _ => Err(ConfigError::UnknownAssetKind(value.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardFace {
    Glyph(&'static str),
    Image(PathBuf),
    /// The symbol id is not in the table.
    Missing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolAssets {
    kind: AssetKind,
    image_dir: PathBuf,
}

impl SymbolAssets {
    pub fn new(kind: AssetKind, image_dir: impl Into<PathBuf>) -> Self {
        SymbolAssets {
            kind,
            image_dir: image_dir.into(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.assets, config.image_dir.clone())
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn face(&self, symbol: &str) -> CardFace {
        let Some(glyph) = glyph_for(symbol) else {
            return CardFace::Missing;
        };
        match self.kind {
            AssetKind::Glyph => CardFace::Glyph(glyph),
            AssetKind::Image => CardFace::Image(self.image_dir.join(format!("{symbol}.png"))),
        }
    }

    pub fn back(&self) -> CardFace {
        match self.kind {
            AssetKind::Glyph => CardFace::Glyph(BACK_GLYPH),
            AssetKind::Image => CardFace::Image(self.image_dir.join(BACK_IMAGE)),
        }
    }

    /// What the board shows for `card` right now.
    pub fn for_card(&self, card: &Card) -> CardFace {
        if card.is_revealed() {
            self.face(card.symbol)
        } else {
            self.back()
        }
    }
}

impl Default for SymbolAssets {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
