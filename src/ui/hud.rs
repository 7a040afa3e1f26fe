use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;

use super::state::AppState;
use crate::game::format_clock;

pub(super) fn set_header_menu(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    if let (Some(header), Some(title)) = (&st.header, &st.title_menu) {
        header.set_title_widget(Some(title));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(false);
    }
    if let Some(restart) = &st.restart_button {
        restart.set_visible(false);
    }
}

pub(super) fn set_header_game(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    if let (Some(header), Some(title_box)) = (&st.header, &st.title_game) {
        update_subtitle(&st);
        header.set_title_widget(Some(title_box));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(true);
    }
    if let Some(restart) = &st.restart_button {
        restart.set_visible(true);
    }
}

pub(super) fn set_header_victory(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    if let (Some(header), Some(title)) = (&st.header, &st.title_victory) {
        header.set_title_widget(Some(title));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(true);
    }
    if let Some(restart) = &st.restart_button {
        restart.set_visible(false);
    }
}

pub(super) fn update_subtitle(st: &AppState) {
    let Some(subtitle) = &st.title_game_subtitle else {
        return;
    };
    match st.game.session() {
        Some(session) => subtitle.set_text(&format!(
            "{} | {}",
            session.difficulty().name(),
            format_clock(session.elapsed_secs())
        )),
        None => subtitle.set_text(""),
    }
}

/// Moves, pairs and time panel, plus the difficulty badge.
pub(super) fn update_stats(st: &AppState) {
    update_subtitle(st);
    let Some(session) = st.game.session() else {
        return;
    };
    let stats = session.stats();
    if let Some(label) = &st.moves_label {
        label.set_text(&stats.moves.to_string());
    }
    if let Some(label) = &st.pairs_label {
        label.set_text(&stats.pairs_label());
    }
    if let Some(label) = &st.time_label {
        label.set_text(&stats.clock());
    }
    if let Some(label) = &st.badge_label {
        let difficulty = session.difficulty();
        label.set_text(&format!("{} {}", difficulty.mood(), difficulty.name()));
        for name in ["easy", "medium", "hard"] {
            label.remove_css_class(name);
        }
        label.add_css_class(&difficulty.name().to_ascii_lowercase());
    }
}
