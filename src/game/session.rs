use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::clock::format_clock;
use super::deck::{Card, CardId, Difficulty, deal};
use super::schedule::{ScheduledTask, Scheduler, SessionId, TaskKind};
use crate::config::GameConfig;

/// What a click on a card did, so the board knows what to animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Nothing changed: input locked, card unavailable or no game running.
    Ignored,
    /// First card of a pair turned up.
    Revealed,
    Matched,
    /// Second card differs; both turn back once the mismatch delay runs out.
    Mismatch,
    /// Matched the last pair.
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub moves: u32,
    pub pairs_found: u32,
    pub total_pairs: u32,
    pub elapsed_secs: u32,
}

impl SessionStats {
    pub fn clock(&self) -> String {
        format_clock(self.elapsed_secs)
    }

    pub fn pairs_label(&self) -> String {
        format!("{}/{}", self.pairs_found, self.total_pairs)
    }
}

/// One dealt board and its counters. Replaced wholesale on every start.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    difficulty: Difficulty,
    deck: Vec<Card>,
    pending: Vec<CardId>,
    move_count: u32,
    matched_pairs: u32,
    elapsed_secs: u32,
    evaluating: bool,
}

impl Session {
    fn new(id: SessionId, difficulty: Difficulty, deck: Vec<Card>) -> Self {
        Session {
            id,
            difficulty,
            deck,
            pending: Vec::with_capacity(2),
            move_count: 0,
            matched_pairs: 0,
            elapsed_secs: 0,
            evaluating: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id)
    }

    /// Cards turned up and still waiting on a match decision, in click order.
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        self.difficulty.pair_count() as u32
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_evaluating(&self) -> bool {
        self.evaluating
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            moves: self.move_count,
            pairs_found: self.matched_pairs,
            total_pairs: self.total_pairs(),
            elapsed_secs: self.elapsed_secs,
        }
    }

    fn accepts_flip(&self, id: CardId) -> bool {
        !self.evaluating
            && self.pending.len() < 2
            && !self.pending.contains(&id)
            && self.deck.get(id).is_some_and(|card| !card.matched)
    }

    fn task(&self, kind: TaskKind, config: &GameConfig) -> ScheduledTask {
        let delay = match kind {
            TaskKind::Tick => config.tick_interval(),
            TaskKind::ResolveMismatch => config.mismatch_delay(),
        };
        ScheduledTask {
            session: self.id,
            kind,
            delay,
        }
    }
}

/// The whole game as the display surface sees it: either on the menu
/// (no session) or playing one session.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    rng: StdRng,
    next_session: SessionId,
    session: Option<Session>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// A game whose deals are reproducible for a given seed.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Game {
            config,
            rng,
            next_session: SessionId::FIRST,
            session: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.session.as_ref().map(Session::difficulty)
    }

    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    pub fn has_won(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_complete)
    }

    /// Deals a new session for `difficulty`, replacing any running one, and
    /// starts its clock. Does nothing without a difficulty.
    pub fn start_game(
        &mut self,
        difficulty: Option<Difficulty>,
        sched: &mut impl Scheduler,
    ) -> Option<SessionId> {
        let difficulty = difficulty?;
        if let Some(previous) = self.session.take() {
            sched.cancel_session(previous.id);
        }

        let id = self.next_session;
        self.next_session = id.next();
        let session = Session::new(id, difficulty, deal(difficulty, &mut self.rng));
        sched.schedule(session.task(TaskKind::Tick, &self.config));
        info!("session {id} started on {}", difficulty.name());
        self.session = Some(session);
        Some(id)
    }

    /// Deals again at the current difficulty.
    pub fn restart(&mut self, sched: &mut impl Scheduler) -> Option<SessionId> {
        self.start_game(self.difficulty(), sched)
    }

    pub fn return_to_menu(&mut self, sched: &mut impl Scheduler) {
        if let Some(session) = self.session.take() {
            sched.cancel_session(session.id);
            info!("session {} closed, back to menu", session.id);
        }
    }

    pub fn flip_card(&mut self, id: CardId, sched: &mut impl Scheduler) -> FlipOutcome {
        let Some(session) = self.session.as_mut() else {
            debug!("flip of card {id} ignored: no game running");
            return FlipOutcome::Ignored;
        };
        if !session.accepts_flip(id) {
            debug!("flip of card {id} ignored in session {}", session.id);
            return FlipOutcome::Ignored;
        }

        session.deck[id].face_up = true;
        session.pending.push(id);
        if session.pending.len() < 2 {
            return FlipOutcome::Revealed;
        }

        session.move_count += 1;
        session.evaluating = true;
        let (first, second) = (session.pending[0], session.pending[1]);

        if session.deck[first].symbol != session.deck[second].symbol {
            debug!("cards {first} and {second} differ, hiding after delay");
            sched.schedule(session.task(TaskKind::ResolveMismatch, &self.config));
            return FlipOutcome::Mismatch;
        }

        session.deck[first].matched = true;
        session.deck[second].matched = true;
        session.matched_pairs += 1;
        session.pending.clear();
        session.evaluating = false;

        if session.is_complete() {
            sched.cancel_session(session.id);
            info!(
                "session {} won in {} moves, {}",
                session.id,
                session.move_count,
                format_clock(session.elapsed_secs)
            );
            FlipOutcome::Won
        } else {
            FlipOutcome::Matched
        }
    }

    /// Runs a task whose delay has passed. Tasks from a session that has since
    /// been replaced or closed are dropped.
    pub fn deliver(&mut self, task: ScheduledTask, sched: &mut impl Scheduler) {
        let Some(session) = self
            .session
            .as_mut()
            .filter(|session| session.id == task.session)
        else {
            debug!("dropping stale {:?} from session {}", task.kind, task.session);
            return;
        };

        match task.kind {
            TaskKind::Tick => {
                if session.is_complete() {
                    return;
                }
                session.elapsed_secs = session.elapsed_secs.saturating_add(1);
                sched.schedule(session.task(TaskKind::Tick, &self.config));
            }
            TaskKind::ResolveMismatch => {
                if !session.evaluating {
                    return;
                }
                for id in session.pending.drain(..) {
                    session.deck[id].face_up = false;
                }
                session.evaluating = false;
            }
        }
    }
}
