//! Memorama, a memory-matching game.
//!
//! Pick a difficulty, turn cards over two at a time and find every pair. The
//! [`game`] module is the whole rule set and runs headless; the GTK front end
//! lives in `ui` behind the `gui` feature.

pub mod assets;
pub mod config;
pub mod game;
#[cfg(feature = "gui")]
pub mod ui;

pub use assets::{AssetKind, CardFace, SymbolAssets};
pub use config::{ConfigError, GameConfig};
pub use game::{Difficulty, FlipOutcome, Game};
