// Navigation bar component
//
// Renders the fixed bar pinned over the top of the document: brand, one
// numbered link per section, and the theme switch state. The document
// scrolls underneath it, which is why render() clears its rows first.
// When the menu panel is open it drops below the bar as an overlay.

use crate::page::NAV_ROWS;
use crate::theme::Palette;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Render the fixed navigation bar over the document's top rows
pub fn render(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let bar = Rect {
        height: NAV_ROWS.min(area.height),
        ..area
    };
    if bar.height == 0 {
        return;
    }
    f.render_widget(Clear, bar);

    // The border doubles as the nav shadow: it brightens once the page
    // has scrolled past the threshold.
    let border_color = if app.page.nav.scrolled {
        palette.nav_border_scrolled
    } else {
        palette.nav_border
    };

    let switch = if app.switch_dark {
        " s [x] dark "
    } else {
        " s [ ] dark "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(palette.border_type)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(palette.background))
        .title_top(
            Line::from(Span::styled(switch, palette.hint_style())).right_aligned(),
        );
    let inner = block.inner(bar);
    f.render_widget(block, bar);

    let brand = Line::from(Span::styled(
        format!(" {}", app.portfolio.name),
        Style::default()
            .fg(palette.brand)
            .add_modifier(Modifier::BOLD),
    ));

    let links = link_line(app, palette);
    let body = Paragraph::new(vec![brand, links]);
    f.render_widget(body, inner);

    if app.page.nav.menu_open {
        render_menu(f, area, app, palette);
    }
}

/// One span per nav link, numbered to match the jump keys
fn link_line(app: &App, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, link) in app.page.nav.links.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if link.active {
            Style::default()
                .fg(palette.nav_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.nav_link)
        };
        spans.push(Span::styled(
            format!("{}:{}", i + 1, link.id.label()),
            style,
        ));
    }
    Line::from(spans)
}

/// Dropdown panel listing the sections, with the cursor row highlighted
fn render_menu(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let links = &app.page.nav.links;
    if links.is_empty() {
        return;
    }

    let width = links
        .iter()
        .map(|l| l.id.label().len())
        .max()
        .unwrap_or(0) as u16
        + 8;
    let height = links.len() as u16 + 2;
    let panel = Rect {
        x: area.x,
        y: area.y + NAV_ROWS.min(area.height),
        width: width.min(area.width),
        height: height.min(area.height.saturating_sub(NAV_ROWS)),
    };
    if panel.height < 3 {
        return;
    }
    f.render_widget(Clear, panel);

    let items: Vec<ListItem> = links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let style = if i == app.menu_cursor {
                Style::default()
                    .fg(palette.selection_fg)
                    .bg(palette.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else if link.active {
                Style::default().fg(palette.nav_active)
            } else {
                Style::default().fg(palette.nav_link)
            };
            ListItem::new(format!(" {} ", link.id.label())).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(palette.border_type)
            .border_style(Style::default().fg(palette.nav_border_scrolled))
            .style(Style::default().bg(palette.background)),
    );
    f.render_widget(list, panel);
}
