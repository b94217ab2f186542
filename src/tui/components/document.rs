// Document component
//
// Paints the visible slice of the row plan. Rows belonging to an element
// are drawn through that element's visual: every color is blended toward
// the background by the current opacity, and the entry offset is projected
// onto whole rows by borrowing the row above, so a revealing card slides
// up as it fades in. Text is pre-wrapped at layout time; this module never
// re-wraps, it only styles.

use crate::page::{DocRow, SectionId, ROW_PX};
use crate::theme::Palette;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render the document rows visible at the current scroll offset
pub fn render(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let rows = &app.page.layout.rows;
    let first = app.scroll.offset_rows() as usize;

    let mut lines = Vec::with_capacity(area.height as usize);
    for screen_row in 0..area.height as usize {
        let idx = first + screen_row;
        if idx >= rows.len() {
            break;
        }
        lines.push(line_for_row(app, palette, idx));
    }

    f.render_widget(Paragraph::new(Text::from(lines)), area);
}

/// Resolve one document row to a styled line, applying the owning
/// element's fade and slide when there is one.
fn line_for_row(app: &App, palette: &Palette, idx: usize) -> Line<'static> {
    let rows = &app.page.layout.rows;
    let row = &rows[idx];

    let Some(elem) = row.elem() else {
        return style_row(row, app, palette, 1.0);
    };

    let visual = &app.page.elements[elem].visual;
    let opacity = visual.opacity.value(app.now);
    let shift = (visual.offset_px.value(app.now) / ROW_PX)
        .round()
        .clamp(0.0, 2.0) as usize;

    if shift == 0 {
        return style_row(row, app, palette, opacity);
    }
    // Slide: draw the row `shift` places above, provided it belongs to
    // the same element. The element's top rows come up blank until the
    // offset tween lands.
    match idx.checked_sub(shift).map(|i| &rows[i]) {
        Some(src) if src.elem() == Some(elem) => style_row(src, app, palette, opacity),
        _ => Line::default(),
    }
}

fn style_row(row: &DocRow, app: &App, palette: &Palette, opacity: f32) -> Line<'static> {
    let fade = |c: Color| palette.fade(c, opacity);
    let card_inner = app.page.layout.card_inner();

    match row {
        DocRow::Blank => Line::default(),

        DocRow::Heading(id) => Line::from(vec![
            Span::raw("  "),
            Span::styled("▍ ", Style::default().fg(fade(palette.accent))),
            Span::styled(
                heading_text(*id).to_string(),
                Style::default()
                    .fg(fade(palette.heading))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),

        DocRow::HeroName(name) => Line::from(vec![
            Span::raw("  "),
            Span::styled(
                name.clone(),
                Style::default()
                    .fg(fade(palette.heading))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),

        DocRow::HeroTagline(tagline) => Line::from(vec![
            Span::raw("  "),
            Span::styled(tagline.clone(), Style::default().fg(fade(palette.muted))),
        ]),

        DocRow::Hint(text) => Line::from(vec![
            Span::raw("  "),
            Span::styled(text.clone(), Style::default().fg(fade(palette.hint))),
        ]),

        DocRow::Text(text) => Line::from(vec![
            Span::raw("  "),
            Span::styled(text.clone(), Style::default().fg(fade(palette.foreground))),
        ]),

        DocRow::Label(text) => Line::from(vec![
            Span::raw("  "),
            Span::styled(
                text.clone(),
                Style::default()
                    .fg(fade(palette.accent))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),

        DocRow::LinkRow { label, url } => Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{label}  "),
                Style::default().fg(fade(palette.foreground)),
            ),
            Span::styled(
                url.clone(),
                Style::default()
                    .fg(fade(palette.link))
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),

        DocRow::FilterBar => filter_bar(app, palette),

        DocRow::ElemTop { .. } => card_border(card_inner, '╭', '╮', fade(palette.card_border)),
        DocRow::ElemBottom { .. } => card_border(card_inner, '╰', '╯', fade(palette.card_border)),

        DocRow::ElemTitle { text, .. } => card_line(
            text,
            card_inner,
            Style::default()
                .fg(fade(palette.card_title))
                .add_modifier(Modifier::BOLD),
            fade(palette.card_border),
        ),

        DocRow::ElemText { text, .. } => card_line(
            text,
            card_inner,
            Style::default().fg(fade(palette.foreground)),
            fade(palette.card_border),
        ),

        DocRow::ElemMeta { text, .. } => card_line(
            text,
            card_inner,
            Style::default().fg(fade(palette.card_meta)),
            fade(palette.card_border),
        ),

        DocRow::ElemMark { text, .. } => Line::from(vec![
            Span::raw("  "),
            Span::styled(
                "◆ ",
                Style::default()
                    .fg(fade(palette.timeline))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                text.clone(),
                Style::default()
                    .fg(fade(palette.foreground))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),

        DocRow::ElemSide { text, .. } => Line::from(vec![
            Span::raw("  "),
            Span::styled("│ ", Style::default().fg(fade(palette.timeline))),
            Span::styled(text.clone(), Style::default().fg(fade(palette.foreground))),
        ]),
    }
}

/// Chip row: the active tag gets the inverted chip treatment
fn filter_bar(app: &App, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, chip) in app.page.filters.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if chip.active {
            Style::default()
                .fg(palette.chip_active_fg)
                .bg(palette.chip_active_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.chip)
        };
        spans.push(Span::styled(format!(" {} ", chip.tag), style));
    }
    Line::from(spans)
}

fn card_border(card_inner: usize, left: char, right: char, color: Color) -> Line<'static> {
    let mut s = String::with_capacity(card_inner + 4);
    s.push(left);
    for _ in 0..card_inner + 2 {
        s.push('─');
    }
    s.push(right);
    Line::from(vec![
        Span::raw("  "),
        Span::styled(s, Style::default().fg(color)),
    ])
}

fn card_line(text: &str, card_inner: usize, style: Style, border: Color) -> Line<'static> {
    let pad = card_inner.saturating_sub(text.width());
    Line::from(vec![
        Span::raw("  "),
        Span::styled("│ ", Style::default().fg(border)),
        Span::styled(text.to_string(), style),
        Span::styled(
            format!("{} │", " ".repeat(pad)),
            Style::default().fg(border),
        ),
    ])
}

fn heading_text(id: SectionId) -> &'static str {
    match id {
        SectionId::Home => "Home",
        SectionId::About => "About Me",
        SectionId::Skills => "Skills",
        SectionId::Competitive => "Competitive Programming",
        SectionId::Projects => "Projects",
        SectionId::Education => "Education",
        SectionId::Contact => "Get In Touch",
    }
}
