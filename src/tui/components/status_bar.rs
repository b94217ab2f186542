// Status bar component
//
// One row at the bottom: active section and scroll position on the left,
// the key hints on the right.

use crate::theme::Palette;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let section = match app.page.active_link() {
        Some(id) => id.label(),
        None => "·",
    };

    let max = app.scroll.max_offset();
    let percent = if max > 0.0 {
        ((app.scroll.offset_px() / max) * 100.0).round() as u16
    } else {
        100
    };

    let hints = " m menu · t theme · c contact · ? help · q quit ";
    let chunks = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(hints.len() as u16),
    ])
    .split(area);

    let left = Line::from(vec![
        Span::styled(
            format!(" {section} "),
            Style::default()
                .fg(palette.status_bar)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("· {percent}% "), palette.status_style()),
    ]);
    f.render_widget(Paragraph::new(left), chunks[0]);

    f.render_widget(
        Paragraph::new(Span::styled(hints, palette.status_style())),
        chunks[1],
    );
}
