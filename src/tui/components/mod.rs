// Components module - the page's UI building blocks
//
// draw() is the single frame entry point: background, document, the
// fixed navbar over it, status bar, then whichever overlay is up and
// finally the toast. Ordering matters, later widgets paint on top.

pub mod document;
pub mod navbar;
pub mod overlays;
pub mod status_bar;
pub mod toast;

pub use toast::Toast;

use crate::behavior::contact;
use crate::tui::app::{App, Overlay};
use ratatui::{
    layout::{Constraint, Layout},
    widgets::Block,
    Frame,
};

/// Render one frame
pub fn draw(f: &mut Frame, app: &App) {
    let palette = app.palette();
    let area = f.area();

    if app.config.use_theme_background {
        f.render_widget(Block::default().style(palette.base_style()), area);
    }

    let chunks =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    let doc_area = chunks[0];
    let status_area = chunks[1];

    document::render(f, doc_area, app, &palette);
    navbar::render(f, doc_area, app, &palette);
    status_bar::render(f, status_area, app, &palette);

    match &app.overlay {
        Some(Overlay::Help) => overlays::render_help(f, &palette),
        Some(Overlay::Logs) => overlays::render_logs(f, app, &palette),
        Some(Overlay::Contact(form)) => {
            let recipient = contact::recipient(app.portfolio.contact.as_ref()).unwrap_or("");
            overlays::render_form(f, form, recipient, &palette);
        }
        None => {}
    }

    if let Some(toast) = &app.toast {
        toast.render(f, area, &palette);
    }
}
