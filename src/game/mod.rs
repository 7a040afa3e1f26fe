//! Headless game core: dealing, the flip/match state machine and its timers.
//!
//! The display surface owns one [`Game`] and forwards clicks to
//! [`Game::flip_card`]. Delayed work (the play clock and the pause before a
//! mismatched pair turns back) goes through a [`Scheduler`], keyed by the
//! [`SessionId`] that asked for it.

mod clock;
mod deck;
mod schedule;
mod session;

pub use clock::format_clock;
pub use deck::{Card, CardId, Difficulty, SYMBOL_TABLE, Symbol, deal, glyph_for};
pub use schedule::{ScheduledTask, Scheduler, SessionId, TaskKind, Timeline};
pub use session::{FlipOutcome, Game, Session, SessionStats};
