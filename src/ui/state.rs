use std::cell::RefCell;
use std::rc::Weak;

use gtk4 as gtk;
use libadwaita as adw;

use super::scheduler::GlibScheduler;
use crate::assets::SymbolAssets;
use crate::config::GameConfig;
use crate::game::Game;

pub struct AppState {
    pub view_stack: Option<gtk::Stack>,
    pub header: Option<adw::HeaderBar>,
    pub back_button: Option<gtk::Button>,
    pub restart_button: Option<gtk::Button>,
    pub title_menu: Option<gtk::Label>,
    pub title_game: Option<gtk::Widget>,
    pub title_game_subtitle: Option<gtk::Label>,
    pub title_victory: Option<gtk::Widget>,
    pub moves_label: Option<gtk::Label>,
    pub pairs_label: Option<gtk::Label>,
    pub time_label: Option<gtk::Label>,
    pub badge_label: Option<gtk::Label>,
    pub victory_level_label: Option<gtk::Label>,
    pub victory_stats_label: Option<gtk::Label>,
    pub board_container: Option<gtk::Box>,
    pub dynamic_css_provider: Option<gtk::CssProvider>,

    pub grid_buttons: Vec<gtk::Button>,
    pub flip_anim_phase: bool,
    pub assets: SymbolAssets,

    // Game state
    pub game: Game,
    pub scheduler: GlibScheduler,
}

impl AppState {
    pub fn new(config: GameConfig, handle: Weak<RefCell<AppState>>) -> Self {
        AppState {
            view_stack: None,
            header: None,
            back_button: None,
            restart_button: None,
            title_menu: None,
            title_game: None,
            title_game_subtitle: None,
            title_victory: None,
            moves_label: None,
            pairs_label: None,
            time_label: None,
            badge_label: None,
            victory_level_label: None,
            victory_stats_label: None,
            board_container: None,
            dynamic_css_provider: None,
            grid_buttons: Vec::new(),
            flip_anim_phase: false,
            assets: SymbolAssets::from_config(&config),
            game: Game::new(config),
            scheduler: GlibScheduler::new(handle),
        }
    }

    /// Columns and rows of the current board, or a placeholder on the menu.
    pub fn grid_size(&self) -> (i32, i32) {
        match self.game.difficulty() {
            Some(difficulty) => (difficulty.columns() as i32, difficulty.rows() as i32),
            None => (4, 3),
        }
    }

    pub fn in_game_view(&self) -> bool {
        self.view_stack
            .as_ref()
            .and_then(|stack| stack.visible_child_name())
            .as_deref()
            == Some("game")
    }
}
