// Overlay dialogs: help, the log view, and the contact form
//
// Each overlay clears the rect behind it and paints an opaque bordered
// box, so the document underneath never bleeds through.

use crate::logging::{LogEntry, LogLevel};
use crate::theme::Palette;
use crate::tui::app::App;
use crate::tui::form::{Field, FormState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Calculate a centered rect for an overlay box
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render the key reference overlay
pub fn render_help(f: &mut Frame, palette: &Palette) {
    let key_style = Style::default().fg(palette.accent);
    let desc_style = Style::default().fg(palette.foreground);
    let header_style = palette.heading_style();

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("   "),
            Span::styled(format!("{:<14}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = vec![
        Line::default(),
        Line::from(Span::styled("  Move around", header_style)),
        kb("j/k, ↓/↑", "scroll by line"),
        kb("d/u, PgDn/Up", "scroll by half page"),
        kb("g/G, Home/End", "top / bottom"),
        kb("1-7", "jump to a section"),
        kb("m", "section menu (j/k, Enter)"),
        Line::default(),
        Line::from(Span::styled("  Page", header_style)),
        kb("Tab/Shift-Tab", "cycle the project filter"),
        kb("t", "toggle light/dark"),
        kb("s", "flip the theme switch"),
        kb("c", "compose a message"),
        kb("y", "copy the contact email"),
        Line::default(),
        Line::from(Span::styled("  App", header_style)),
        kb("l", "logs"),
        kb("?", "this help"),
        kb("q", "quit"),
        Line::default(),
    ];

    let height = content.len() as u16 + 2;
    let area = centered_rect(46, height, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(palette.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(palette.border_type)
                .border_style(Style::default().fg(palette.accent))
                .title(" Keys ")
                .title_bottom(Line::from(" ? or Esc to close ").centered()),
        );
    f.render_widget(paragraph, area);
}

/// Render the captured-log overlay, most recent entry at the bottom
pub fn render_logs(f: &mut Frame, app: &App, palette: &Palette) {
    let frame_area = f.area();
    let width = (frame_area.width * 85 / 100).clamp(40, 100);
    let height = (frame_area.height * 70 / 100).max(10);
    let area = centered_rect(width, height, frame_area);
    f.render_widget(Clear, area);

    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from(Span::styled(
            " nothing logged yet",
            palette.hint_style(),
        ))]
    } else {
        entries.iter().map(|e| log_line(e, palette)).collect()
    };

    let title = format!(" Logs ({}) ", app.log_buffer.len());
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(palette.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(palette.border_type)
                .border_style(Style::default().fg(palette.hint))
                .title(title)
                .title_bottom(Line::from(" l or Esc to close ").centered()),
        );
    f.render_widget(paragraph, area);
}

fn log_line(entry: &LogEntry, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {} ", entry.timestamp.format("%H:%M:%S")),
            Style::default().fg(palette.muted),
        ),
        Span::styled(
            format!("{:>5} ", entry.level.as_str()),
            Style::default()
                .fg(level_color(&entry.level, palette))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", entry.target),
            Style::default().fg(palette.hint),
        ),
        Span::styled(
            entry.message.clone(),
            Style::default().fg(palette.foreground),
        ),
    ])
}

fn level_color(level: &LogLevel, palette: &Palette) -> Color {
    match level {
        LogLevel::Error => palette.log_error,
        LogLevel::Warn => palette.log_warn,
        LogLevel::Info => palette.log_info,
        LogLevel::Debug => palette.log_debug,
        LogLevel::Trace => palette.log_trace,
    }
}

/// Render the contact form overlay
///
/// The focused field carries a cursor mark; the Send button inverts when
/// focused. The recipient line is read-only, it comes from the portfolio.
pub fn render_form(f: &mut Frame, form: &FormState, recipient: &str, palette: &Palette) {
    let area = centered_rect(56, 17, f.area());
    f.render_widget(Clear, area);

    let label_style = Style::default().fg(palette.hint);
    let focus_label = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(palette.foreground);

    let field_line = |field: Field| -> Line {
        let focused = form.focus == field;
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                format!("{:<9}", field.label()),
                if focused { focus_label } else { label_style },
            ),
            Span::styled(form.value(field).to_string(), value_style),
        ];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
        }
        Line::from(spans)
    };

    let mut content = vec![
        Line::from(vec![
            Span::styled(format!("{:<10}", " To"), label_style),
            Span::styled(
                recipient.to_string(),
                Style::default().fg(palette.link),
            ),
        ]),
        Line::default(),
        field_line(Field::Name),
        field_line(Field::Email),
        field_line(Field::Subject),
        Line::from(Span::styled(
            format!(" {:<9}", Field::Message.label()),
            if form.focus == Field::Message {
                focus_label
            } else {
                label_style
            },
        )),
    ];

    // Last few message lines, cursor on the end of the final one
    let message = form.value(Field::Message);
    let mut msg_lines: Vec<&str> = message.split('\n').collect();
    let shown = msg_lines.split_off(msg_lines.len().saturating_sub(4));
    for (i, line) in shown.iter().enumerate() {
        let mut spans = vec![
            Span::raw("   "),
            Span::styled(line.to_string(), value_style),
        ];
        if form.focus == Field::Message && i == shown.len() - 1 {
            spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
        }
        content.push(Line::from(spans));
    }
    while content.len() < 11 {
        content.push(Line::default());
    }

    content.push(Line::default());
    let send_style = if form.focus == Field::Send {
        Style::default()
            .fg(palette.selection_fg)
            .bg(palette.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.accent)
    };
    content.push(Line::from(Span::styled("  [ Send ]", send_style)));

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(palette.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(palette.border_type)
                .border_style(Style::default().fg(palette.accent))
                .title(" Compose message ")
                .title_bottom(
                    Line::from(" Tab:next  Enter:send  Esc:close ").centered(),
                ),
        );
    f.render_widget(paragraph, area);
}
