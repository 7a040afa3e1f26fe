//! GTK4/libadwaita front end: menu, board, stats panel and victory page.

mod app;
mod board;
mod dialogs;
mod hud;
mod scene;
mod scheduler;
mod state;

pub use app::run;
