use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gtk4::glib;

use super::app::refresh_board;
use super::hud::update_stats;
use super::state::AppState;
use crate::game::{ScheduledTask, Scheduler, SessionId, TaskKind};

/// Runs game tasks on the GLib main loop.
///
/// Each task becomes a one-shot timeout. Sources are tracked per session so a
/// replaced session can drop its timers before they fire.
pub struct GlibScheduler {
    state: Weak<RefCell<AppState>>,
    next_key: u64,
    sources: HashMap<u64, (SessionId, glib::SourceId)>,
}

impl GlibScheduler {
    pub fn new(state: Weak<RefCell<AppState>>) -> Self {
        GlibScheduler {
            state,
            next_key: 0,
            sources: HashMap::new(),
        }
    }
}

impl Scheduler for GlibScheduler {
    fn schedule(&mut self, task: ScheduledTask) {
        let key = self.next_key;
        self.next_key = self.next_key.wrapping_add(1);
        let state = self.state.clone();
        let source = glib::timeout_add_local_once(task.delay, move || {
            if let Some(state) = state.upgrade() {
                fire(&state, key, task);
            }
        });
        self.sources.insert(key, (task.session, source));
    }

    fn cancel_session(&mut self, session: SessionId) {
        let keys: Vec<u64> = self
            .sources
            .iter()
            .filter(|(_, (owner, _))| *owner == session)
            .map(|(key, _)| *key)
            .collect();
        for key in keys {
            if let Some((_, source)) = self.sources.remove(&key) {
                source.remove();
            }
        }
    }
}

fn fire(state: &Rc<RefCell<AppState>>, key: u64, task: ScheduledTask) {
    {
        let mut st = state.borrow_mut();
        // The source is spent; removing it again would be an error.
        st.scheduler.sources.remove(&key);
        let AppState { game, scheduler, .. } = &mut *st;
        game.deliver(task, scheduler);
    }

    match task.kind {
        TaskKind::Tick => update_stats(&state.borrow()),
        TaskKind::ResolveMismatch => refresh_board(state),
    }
}
