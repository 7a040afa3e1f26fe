use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("How to play"),
        Some(
            "Pick a difficulty and find every pair of identical symbols.\n\
Turn two cards at a time; matching cards stay up.\n\
Finish in as few moves and as little time as you can.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Memorama")
        .application_icon("applications-games-symbolic")
        .version(env!("CARGO_PKG_VERSION"))
        .comments("A memory game for finding pairs.")
        .build();
    dialog.add_legal_section("Memorama", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}
