use std::cell::RefCell;
use std::rc::Rc;

use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use log::debug;

use super::board::{CONTENT_MARGIN, sync_card_buttons};
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::{set_header_menu, update_stats};
use super::scene::{rebuild_board, show_game, show_menu, show_victory};
use super::state::AppState;
use crate::config::GameConfig;
use crate::game::{Difficulty, FlipOutcome};

const APP_ID: &str = "io.github.memorama.Memorama";
const STYLE: &str = include_str!("style.css");
const VICTORY_DELAY_MS: u64 = 600;

fn clear_flip_classes(button: &gtk::Button) {
    button.remove_css_class("flip-show-a");
    button.remove_css_class("flip-show-b");
}

fn play_flip_show(st: &mut AppState, index: usize) {
    let Some(button) = st.grid_buttons.get(index).cloned() else {
        return;
    };
    clear_flip_classes(&button);
    st.flip_anim_phase = !st.flip_anim_phase;
    if st.flip_anim_phase {
        button.add_css_class("flip-show-a");
    } else {
        button.add_css_class("flip-show-b");
    }
}

/// Repaints every card and the stats panel from the game.
pub(super) fn refresh_board(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    sync_card_buttons(&st);
    update_stats(&st);
}

pub fn handle_card_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let outcome = {
        let mut st = state.borrow_mut();
        let AppState { game, scheduler, .. } = &mut *st;
        let outcome = game.flip_card(index, scheduler);
        if outcome != FlipOutcome::Ignored {
            play_flip_show(&mut st, index);
        }
        outcome
    };

    match outcome {
        FlipOutcome::Ignored => return,
        FlipOutcome::Won => schedule_victory(state),
        FlipOutcome::Revealed | FlipOutcome::Matched | FlipOutcome::Mismatch => (),
    }
    refresh_board(state);
}

/// Lets the last pair settle before the victory page slides in.
fn schedule_victory(state: &Rc<RefCell<AppState>>) {
    let Some(session_id) = state.borrow().game.session().map(|session| session.id()) else {
        return;
    };
    let state_weak = Rc::downgrade(state);
    glib::timeout_add_local_once(std::time::Duration::from_millis(VICTORY_DELAY_MS), move || {
        let Some(state) = state_weak.upgrade() else {
            return;
        };
        let still_current = {
            let st = state.borrow();
            st.in_game_view()
                && st.game.has_won()
                && st.game.session().map(|session| session.id()) == Some(session_id)
        };
        if still_current {
            show_victory(&state);
        } else {
            debug!("victory for session {session_id} skipped, board moved on");
        }
    });
}

fn start_difficulty(state: &Rc<RefCell<AppState>>, difficulty: Difficulty) {
    {
        let mut st = state.borrow_mut();
        let AppState { game, scheduler, .. } = &mut *st;
        game.start_game(Some(difficulty), scheduler);
    }
    rebuild_board(state);
    show_game(state);
}

fn restart_game(state: &Rc<RefCell<AppState>>) {
    let restarted = {
        let mut st = state.borrow_mut();
        let AppState { game, scheduler, .. } = &mut *st;
        game.restart(scheduler).is_some()
    };
    if restarted {
        rebuild_board(state);
        show_game(state);
    }
}

fn return_to_menu(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        let AppState { game, scheduler, .. } = &mut *st;
        game.return_to_menu(scheduler);
    }
    show_menu(state);
}

pub fn run(config: GameConfig) -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();

        let state = Rc::new_cyclic(|handle| RefCell::new(AppState::new(config.clone(), handle.clone())));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        let dynamic_css_provider = gtk::CssProvider::new();
        if let Some(display) = gdk::Display::default() {
            gtk::style_context_add_provider_for_display(
                &display,
                &dynamic_css_provider,
                gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }

        let title_menu = gtk::Label::new(None);
        title_menu.set_markup("<b>Memorama</b>");
        title_menu.set_halign(gtk::Align::Center);

        let title_game_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        title_game_box.set_valign(gtk::Align::Center);
        title_game_box.set_halign(gtk::Align::Center);
        title_game_box.set_hexpand(true);

        let title_game_main = gtk::Label::builder()
            .label("Memorama")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-main"])
            .build();

        let title_game_subtitle = gtk::Label::builder()
            .label("")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-subtitle", "caption"])
            .build();

        title_game_box.append(&title_game_main);
        title_game_box.append(&title_game_subtitle);

        let title_victory_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        title_victory_box.set_valign(gtk::Align::Center);
        title_victory_box.set_halign(gtk::Align::Center);

        let title_victory_main = gtk::Label::new(Some("Memorama"));
        title_victory_main.add_css_class("game-title-main");

        let title_victory_sub = gtk::Label::new(Some("Victory"));
        title_victory_sub.add_css_class("game-title-subtitle");
        title_victory_sub.add_css_class("caption");

        title_victory_box.append(&title_victory_main);
        title_victory_box.append(&title_victory_sub);

        let header = adw::HeaderBar::builder().title_widget(&title_menu).build();
        header.add_css_class("flat");

        let back_button = gtk::Button::builder()
            .icon_name("go-previous-symbolic")
            .build();
        back_button.set_tooltip_text(Some("Main Menu"));
        back_button.connect_clicked({
            let state = state.clone();
            move |_| {
                return_to_menu(&state);
            }
        });
        header.pack_start(&back_button);

        let menu_model = gio::Menu::new();
        menu_model.append(Some("How to Play"), Some("app.instructions"));
        menu_model.append(Some("About Memorama"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some("Restart"));
        restart_button.connect_clicked({
            let state = state.clone();
            move |_| {
                restart_game(&state);
            }
        });
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&restart_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_hhomogeneous(false);
        view_stack.set_vhomogeneous(false);
        view_stack.set_interpolate_size(false);
        view_stack.set_transition_duration(300);

        let game_view = build_game_view(&state);
        view_stack.add_named(&game_view, Some("game"));

        let victory_view = build_victory_view(&state);
        view_stack.add_named(&victory_view, Some("victory"));

        let menu_view = build_menu_view(&state);
        view_stack.add_named(&menu_view, Some("menu"));

        view_stack.set_visible_child_name("menu");
        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Memorama")
            .default_width(860)
            .default_height(720)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 560);

        {
            let mut st = state.borrow_mut();
            st.view_stack = Some(view_stack);
            st.header = Some(header);
            st.back_button = Some(back_button);
            st.restart_button = Some(restart_button);
            st.title_menu = Some(title_menu);
            st.title_game = Some(title_game_box.upcast::<gtk::Widget>());
            st.title_game_subtitle = Some(title_game_subtitle);
            st.title_victory = Some(title_victory_box.upcast::<gtk::Widget>());
            st.dynamic_css_provider = Some(dynamic_css_provider);
        }

        let global_key = gtk::EventControllerKey::new();
        global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
        global_key.connect_key_pressed({
            let state = state.clone();
            move |_, key, _, _| {
                if key == gdk::Key::Escape && state.borrow().in_game_view() {
                    return_to_menu(&state);
                    return glib::Propagation::Stop;
                }
                glib::Propagation::Proceed
            }
        });
        win.add_controller(global_key);

        set_header_menu(&state);
        win.present();
    });

    app.run()
}

fn load_css() {
    let Some(display) = gdk::Display::default() else {
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLE);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn difficulty_button(state: &Rc<RefCell<AppState>>, difficulty: Difficulty) -> gtk::Button {
    let content = gtk::Box::new(gtk::Orientation::Vertical, 6);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    let mood = gtk::Label::new(Some(difficulty.mood()));
    mood.add_css_class("difficulty-mood");
    let name = gtk::Label::new(Some(difficulty.name()));
    name.add_css_class("title-3");
    let summary = gtk::Label::new(Some(&difficulty.summary()));
    summary.add_css_class("caption");

    let preview = gtk::Grid::new();
    preview.set_row_spacing(3);
    preview.set_column_spacing(3);
    preview.set_halign(gtk::Align::Center);
    let preview_cols = difficulty.columns().min(4);
    for i in 0..difficulty.pair_count() {
        let cell = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        cell.set_size_request(14, 14);
        cell.add_css_class("difficulty-preview-cell");
        preview.attach(&cell, (i % preview_cols) as i32, (i / preview_cols) as i32, 1, 1);
    }

    content.append(&mood);
    content.append(&name);
    content.append(&summary);
    content.append(&preview);

    let button = gtk::Button::builder()
        .child(&content)
        .css_classes(vec![
            "difficulty-button".to_string(),
            difficulty.name().to_ascii_lowercase(),
        ])
        .build();
    button.set_hexpand(true);
    button.connect_clicked({
        let state = state.clone();
        move |_| {
            start_difficulty(&state, difficulty);
        }
    });
    button
}

fn build_menu_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("main-menu-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 18);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);

    let title = gtk::Label::new(Some("Choose a difficulty"));
    title.add_css_class("title-1");

    let buttons_box = gtk::Box::new(gtk::Orientation::Horizontal, 13);
    buttons_box.set_homogeneous(true);
    buttons_box.set_halign(gtk::Align::Center);
    for difficulty in Difficulty::ALL {
        buttons_box.append(&difficulty_button(state, difficulty));
    }

    let hint = gtk::Label::new(Some(
        "💡 Find every pair of identical symbols in as little time as you can.",
    ));
    hint.set_wrap(true);
    hint.set_justify(gtk::Justification::Center);
    hint.add_css_class("dim-label");

    content.append(&title);
    content.append(&buttons_box);
    content.append(&hint);

    center.set_center_widget(Some(&content));
    root.append(&center);

    root
}

fn stat_column(value_class: &str, caption: &str) -> (gtk::Box, gtk::Label) {
    let column = gtk::Box::new(gtk::Orientation::Vertical, 2);
    let value = gtk::Label::new(Some("0"));
    value.add_css_class("stat-value");
    value.add_css_class(value_class);
    let label = gtk::Label::new(Some(caption));
    label.add_css_class("caption");
    label.add_css_class("dim-label");
    column.append(&value);
    column.append(&label);
    (column, value)
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_halign(gtk::Align::Fill);
    content.set_valign(gtk::Align::Fill);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);

    let stats_panel = gtk::Box::new(gtk::Orientation::Horizontal, 24);
    stats_panel.add_css_class("stats-panel");
    let (moves_column, moves_label) = stat_column("moves", "Moves");
    let (pairs_column, pairs_label) = stat_column("pairs", "Pairs");
    let (time_column, time_label) = stat_column("time", "Time");
    time_label.set_text("00:00");
    stats_panel.append(&moves_column);
    stats_panel.append(&pairs_column);
    stats_panel.append(&time_column);

    let badge_label = gtk::Label::new(None);
    badge_label.add_css_class("difficulty-badge");
    badge_label.set_hexpand(true);
    badge_label.set_halign(gtk::Align::End);
    badge_label.set_valign(gtk::Align::Center);
    stats_panel.append(&badge_label);
    content.append(&stats_panel);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("memorama-card-container");
    content.append(&board_card);

    let actions = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    actions.set_homogeneous(true);
    let menu_btn = gtk::Button::with_label("← Main Menu");
    menu_btn.connect_clicked({
        let state = state.clone();
        move |_| {
            return_to_menu(&state);
        }
    });
    let restart_btn = gtk::Button::with_label("🔄 Restart");
    restart_btn.add_css_class("suggested-action");
    restart_btn.connect_clicked({
        let state = state.clone();
        move |_| {
            restart_game(&state);
        }
    });
    actions.append(&menu_btn);
    actions.append(&restart_btn);
    content.append(&actions);

    root.append(&content);

    {
        let mut st = state.borrow_mut();
        st.board_container = Some(board_card);
        st.moves_label = Some(moves_label);
        st.pairs_label = Some(pairs_label);
        st.time_label = Some(time_label);
        st.badge_label = Some(badge_label);
    }

    root
}

fn build_victory_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("victory-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 14);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.add_css_class("victory-card");
    content.set_margin_top(28);
    content.set_margin_bottom(28);
    content.set_margin_start(28);
    content.set_margin_end(28);

    let party = gtk::Label::new(Some("🎉"));
    party.add_css_class("victory-party");

    let title = gtk::Label::new(Some("Congratulations!"));
    title.add_css_class("title-1");

    let level = gtk::Label::new(None);
    level.add_css_class("body");

    let stats = gtk::Label::new(None);
    stats.add_css_class("body");
    stats.set_justify(gtk::Justification::Center);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    buttons.set_halign(gtk::Align::Center);
    buttons.set_margin_top(6);

    let menu_btn = gtk::Button::with_label("Menu");
    menu_btn.connect_clicked({
        let state = state.clone();
        move |_| {
            return_to_menu(&state);
        }
    });
    let again_btn = gtk::Button::with_label("Play Again");
    again_btn.add_css_class("suggested-action");
    again_btn.connect_clicked({
        let state = state.clone();
        move |_| {
            restart_game(&state);
        }
    });

    buttons.append(&menu_btn);
    buttons.append(&again_btn);

    content.append(&party);
    content.append(&title);
    content.append(&level);
    content.append(&stats);
    content.append(&buttons);
    center.set_center_widget(Some(&content));
    root.append(&center);

    {
        let mut st = state.borrow_mut();
        st.victory_level_label = Some(level);
        st.victory_stats_label = Some(stats);
    }

    root
}
