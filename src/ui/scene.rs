use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::build_board_grid;
use super::hud::{set_header_game, set_header_menu, set_header_victory, update_stats};
use super::state::AppState;

pub(super) fn rebuild_board(state: &Rc<RefCell<AppState>>) {
    let (board_container, (grid_cols, grid_rows)) = {
        let st = state.borrow();
        (st.board_container.clone(), st.grid_size())
    };
    let Some(board_container) = board_container else {
        return;
    };

    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    let grid_ratio = if grid_rows > 0 {
        grid_cols as f32 / grid_rows as f32
    } else {
        1.0
    };
    let grid_frame = gtk::AspectFrame::new(0.5, 0.5, grid_ratio, false);
    grid_frame.set_halign(gtk::Align::Fill);
    grid_frame.set_valign(gtk::Align::Fill);
    grid_frame.set_hexpand(true);
    grid_frame.set_vexpand(true);
    grid_frame.set_child(Some(&grid));
    board_container.append(&grid_frame);
}

fn switch_to(state: &Rc<RefCell<AppState>>, page: &str, transition: gtk::StackTransitionType) {
    let st = state.borrow();
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(transition);
        stack.set_visible_child_name(page);
    }
}

pub(super) fn show_game(state: &Rc<RefCell<AppState>>) {
    update_stats(&state.borrow());
    set_header_game(state);
    switch_to(state, "game", gtk::StackTransitionType::SlideLeft);
}

pub(super) fn show_victory(state: &Rc<RefCell<AppState>>) {
    {
        let st = state.borrow();
        let Some(session) = st.game.session() else {
            return;
        };
        let difficulty = session.difficulty();
        let stats = session.stats();
        if let Some(label) = &st.victory_level_label {
            label.set_text(&format!("Level: {} {}", difficulty.name(), difficulty.mood()));
        }
        if let Some(label) = &st.victory_stats_label {
            label.set_text(&format!("Moves: {}\nTime: {}", stats.moves, stats.clock()));
        }
    }
    set_header_victory(state);
    switch_to(state, "victory", gtk::StackTransitionType::SlideLeft);
}

pub(super) fn show_menu(state: &Rc<RefCell<AppState>>) {
    set_header_menu(state);
    switch_to(state, "menu", gtk::StackTransitionType::SlideRight);
}
