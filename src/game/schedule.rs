use std::fmt;
use std::time::Duration;

use super::session::Game;

/// Identity of one dealt session. A fresh id is issued on every start or restart,
/// so work scheduled by an earlier session can be told apart and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) const FIRST: SessionId = SessionId(1);

    pub(crate) fn next(self) -> SessionId {
        SessionId(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// One second of play time.
    Tick,
    /// Turn a non-matching pair back face-down.
    ResolveMismatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub session: SessionId,
    pub kind: TaskKind,
    pub delay: Duration,
}

/// Runs delayed work for a [`Game`].
///
/// Implementations hand each task back through [`Game::deliver`] once its delay
/// has passed, one at a time, never while another game operation is running.
pub trait Scheduler {
    fn schedule(&mut self, task: ScheduledTask);

    /// Drops every task the given session still has waiting.
    fn cancel_session(&mut self, session: SessionId);
}

#[derive(Debug)]
struct Queued {
    due: Duration,
    seq: u64,
    task: ScheduledTask,
}

/// A virtual clock that only moves when told to.
///
/// Headless hosts and tests drive a [`Game`] with it: schedule through the
/// [`Scheduler`] impl, then [`Timeline::advance`] to fire whatever came due.
#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    next_seq: u64,
    queue: Vec<Queued>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.queue.iter().map(|queued| &queued.task)
    }

    /// Moves the clock forward by `by`, delivering every task that falls due on
    /// the way in due order. Tasks scheduled during delivery are honoured if they
    /// also fall inside the window. Returns how many tasks were delivered.
    pub fn advance(&mut self, game: &mut Game, by: Duration) -> usize {
        let target = self.now + by;
        let mut delivered = 0;
        while let Some(position) = self.next_due(target) {
            let queued = self.queue.swap_remove(position);
            self.now = queued.due;
            game.deliver(queued.task, self);
            delivered += 1;
        }
        self.now = target;
        delivered
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .filter(|(_, queued)| queued.due <= target)
            .min_by_key(|(_, queued)| (queued.due, queued.seq))
            .map(|(position, _)| position)
    }
}

impl Scheduler for Timeline {
    fn schedule(&mut self, task: ScheduledTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Queued {
            due: self.now + task.delay,
            seq,
            task,
        });
    }

    fn cancel_session(&mut self, session: SessionId) {
        self.queue.retain(|queued| queued.task.session != session);
    }
}
