use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;

use super::app::handle_card_click;
use super::state::AppState;
use crate::assets::{AssetKind, BACK_GLYPH, CardFace, SymbolAssets};
use crate::game::Card;

pub const CONTENT_MARGIN: i32 = 12;
pub const TILE_GAP: i32 = 6;

pub fn build_board_grid(state: &Rc<RefCell<AppState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("memorama-board");
    grid.set_row_spacing(TILE_GAP as u32);
    grid.set_column_spacing(TILE_GAP as u32);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let (css_provider, (grid_cols, grid_rows), card_count, asset_kind) = {
        let st = state.borrow();
        let card_count = st.game.session().map_or(0, |session| session.deck().len());
        (
            st.dynamic_css_provider.clone(),
            st.grid_size(),
            card_count,
            st.assets.kind(),
        )
    };

    let update_styles = move |grid: &gtk::Grid| {
        let width = grid.width();
        let height = grid.height();
        if width > 0 && height > 0 {
            let cell_width = (width - (grid_cols - 1) * TILE_GAP) / grid_cols;
            let cell_height = (height - (grid_rows - 1) * TILE_GAP) / grid_rows;
            let min_dim = cell_width.min(cell_height);
            let card_radius = (min_dim as f64 * 0.15) as i32;

            if let Some(provider) = &css_provider {
                provider.load_from_data(&format!(
                    ".memorama-card {{ border-radius: {card_radius}px; }}"
                ));
            }
        }
    };

    let update_styles_clone = update_styles.clone();
    grid.connect_closure(
        "notify::width",
        false,
        glib::closure_local!(move |grid: gtk::Grid, _: glib::ParamSpec| {
            update_styles_clone(&grid);
        }),
    );
    grid.connect_closure(
        "notify::height",
        false,
        glib::closure_local!(move |grid: gtk::Grid, _: glib::ParamSpec| {
            update_styles(&grid);
        }),
    );

    let mut buttons = Vec::with_capacity(card_count);

    for index in 0..card_count {
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let button = gtk::Button::builder()
            .css_classes(vec!["memorama-card"])
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        match asset_kind {
            AssetKind::Glyph => button.set_child(Some(&glyph_face(state, index))),
            AssetKind::Image => {
                let picture = gtk::Picture::new();
                picture.set_can_shrink(true);
                picture.add_css_class("memorama-card-picture");
                button.set_child(Some(&picture));
            }
        }

        let state_clone = state.clone();
        button.connect_clicked(move |_| {
            handle_card_click(&state_clone, index);
        });

        aspect_frame.set_child(Some(&button));

        let x = index as i32 % grid_cols;
        let y = index as i32 / grid_cols;
        grid.attach(&aspect_frame, x, y, 1, 1);
        buttons.push(button);
    }

    let mut st = state.borrow_mut();
    st.grid_buttons = buttons;
    sync_card_buttons(&st);

    grid
}

/// A drawing area that paints the card's emoji, or the back glyph while hidden.
fn glyph_face(state: &Rc<RefCell<AppState>>, index: usize) -> gtk::DrawingArea {
    let drawing_area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .build();
    drawing_area.add_css_class("memorama-card-label");

    let state_draw = Rc::downgrade(state);
    drawing_area.set_draw_func(move |area, cr, width, height| {
        let Some(state) = state_draw.upgrade() else {
            return;
        };
        let st = state.borrow();
        let Some(card) = st.game.session().and_then(|session| session.card(index)) else {
            return;
        };
        let text = match st.assets.for_card(card) {
            CardFace::Glyph(glyph) => glyph,
            CardFace::Image(_) | CardFace::Missing => BACK_GLYPH,
        };

        let is_hidden = !card.is_revealed();
        let min_dim = width.min(height) as f64;
        let font_size = if is_hidden {
            min_dim * 0.34
        } else {
            min_dim * 0.40
        };

        cr.set_antialias(cairo::Antialias::Best);

        let layout = pangocairo::functions::create_layout(cr);
        let mut font_desc = pango::FontDescription::new();
        if is_hidden {
            font_desc.set_family("Cantarell, Noto Sans, sans");
            font_desc.set_weight(pango::Weight::Bold);
        } else {
            font_desc.set_family("Noto Color Emoji, Apple Color Emoji, Segoe UI Emoji, sans");
        }
        font_desc.set_size((font_size * pango::SCALE as f64) as i32);
        layout.set_font_description(Some(&font_desc));
        layout.set_text(text);

        let fg = area.style_context().color();
        cr.set_source_rgba(
            fg.red() as f64,
            fg.green() as f64,
            fg.blue() as f64,
            fg.alpha() as f64,
        );

        let (text_width, text_height) = layout.pixel_size();
        cr.move_to(
            (width as f64 - text_width as f64) / 2.0,
            (height as f64 - text_height as f64) / 2.0,
        );

        pangocairo::functions::show_layout(cr, &layout);
    });

    drawing_area
}

fn sync_card_button(button: &gtk::Button, card: &Card, assets: &SymbolAssets) {
    if card.matched {
        button.add_css_class("matched");
    } else {
        button.remove_css_class("matched");
    }
    if card.face_up && !card.matched {
        button.add_css_class("active");
    } else {
        button.remove_css_class("active");
    }
    button.set_sensitive(!card.is_revealed());

    if let Some(picture) = button.child().and_downcast::<gtk::Picture>() {
        if let CardFace::Image(path) = assets.for_card(card) {
            picture.set_filename(Some(path.as_path()));
        }
    } else if let Some(child) = button.child() {
        child.queue_draw();
    }
}

/// Brings every card button in line with the deck.
pub(super) fn sync_card_buttons(st: &AppState) {
    let Some(session) = st.game.session() else {
        return;
    };
    for (button, card) in st.grid_buttons.iter().zip(session.deck()) {
        sync_card_button(button, card, &st.assets);
    }
}
