// TUI module - Terminal User Interface
//
// Terminal setup and cleanup, the event loop, and layered key dispatch:
// Overlay → Global → Page. The page layer has a sub-layer of its own,
// the nav menu, which captures the cursor keys while open.

pub mod app;
pub mod components;
pub mod form;
pub mod input;

use crate::config::Config;
use crate::content::Portfolio;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Overlay, LINE_STEP_PX};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use form::FormAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Animation frame cadence; tweens are sampled at this rate
const TICK: Duration = Duration::from_millis(50);

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, also when the loop returns an error.
pub async fn run_tui(config: Config, portfolio: Portfolio, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let size = terminal.size().context("Failed to read terminal size")?;
    let mut app = App::new(config, portfolio, log_buffer, size.width, size.height);

    let result = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on two sources with tokio::select!: terminal input, and the
/// animation tick that advances glides, tweens and deferred filter steps.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(TICK);

    loop {
        terminal
            .draw(|f| components::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        Ok(Event::Resize(width, height)) => {
                            app.handle_resize(width, height, Instant::now());
                        }
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Overlay → Global → Page
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if handle_overlay_input(app, &key_event) {
        return;
    }
    if handle_global_keys(app, &key_event) {
        return;
    }

    match key_event.kind {
        KeyEventKind::Press => handle_page_keys(app, key_event.code),
        KeyEventKind::Release => app.handle_key_release(key_event.code),
        _ => {}
    }
}

/// Handle overlay input - returns true if an overlay absorbed it
fn handle_overlay_input(app: &mut App, key_event: &KeyEvent) -> bool {
    if app.overlay.is_none() {
        return false;
    }

    // Always process Release events to keep the InputHandler in sync.
    // Without this, keys get stuck "pressed" after the overlay closes.
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }
    if key_event.kind != KeyEventKind::Press {
        return true;
    }

    let key = key_event.code;
    match &mut app.overlay {
        Some(Overlay::Help) => {
            if app.handle_key_press(key)
                && matches!(key, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q'))
            {
                app.overlay = None;
            }
        }
        Some(Overlay::Logs) => {
            if app.handle_key_press(key)
                && matches!(key, KeyCode::Esc | KeyCode::Char('l') | KeyCode::Char('q'))
            {
                app.overlay = None;
            }
        }
        Some(Overlay::Contact(form)) => {
            // Text entry bypasses the repeat handler: typing the same
            // letter twice quickly must not be debounced away.
            match form.handle_key(key) {
                FormAction::None => {}
                FormAction::Close => app.overlay = None,
                FormAction::Submit => app.submit_contact(),
            }
        }
        None => {}
    }
    true
}

/// Handle global keys - returns true if handled
/// These work the same whether or not the nav menu is open.
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    let key = key_event.code;
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            if app.handle_key_press(key) {
                app.should_quit = true;
            }
            true
        }
        KeyCode::Char('?') => {
            if app.handle_key_press(key) {
                app.overlay = Some(Overlay::Help);
            }
            true
        }
        KeyCode::Char('l') => {
            if app.handle_key_press(key) {
                app.overlay = Some(Overlay::Logs);
            }
            true
        }
        KeyCode::Char('t') => {
            if app.handle_key_press(key) {
                app.toggle_theme();
            }
            true
        }
        KeyCode::Char('s') => {
            if app.handle_key_press(key) {
                app.flip_switch();
            }
            true
        }
        KeyCode::Char('c') => {
            if app.handle_key_press(key) {
                app.open_contact();
            }
            true
        }
        KeyCode::Char('y') => {
            if app.handle_key_press(key) {
                app.copy_email();
            }
            true
        }
        _ => false,
    }
}

/// Page-level keys: scrolling, section jumps, the filter and the menu
fn handle_page_keys(app: &mut App, key: KeyCode) {
    let now = Instant::now();

    // Menu layer: while the panel is open the cursor keys drive it
    if app.page.nav.menu_open {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if app.handle_key_press(key) {
                    app.menu_move(-1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if app.handle_key_press(key) {
                    app.menu_move(1);
                }
            }
            KeyCode::Enter => {
                if app.handle_key_press(key) {
                    app.menu_activate(now);
                }
            }
            KeyCode::Esc | KeyCode::Char('m') => {
                if app.handle_key_press(key) {
                    app.close_menu();
                }
            }
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Char('m') => {
            if app.handle_key_press(key) {
                app.toggle_menu();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.handle_key_press(key) {
                app.scroll_by_px(-LINE_STEP_PX, now);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.handle_key_press(key) {
                app.scroll_by_px(LINE_STEP_PX, now);
            }
        }
        KeyCode::PageUp | KeyCode::Char('u') => {
            if app.handle_key_press(key) {
                let step = app.half_page_px();
                app.scroll_by_px(-step, now);
            }
        }
        KeyCode::PageDown | KeyCode::Char('d') => {
            if app.handle_key_press(key) {
                let step = app.half_page_px();
                app.scroll_by_px(step, now);
            }
        }
        KeyCode::Home | KeyCode::Char('g') => {
            if app.handle_key_press(key) {
                app.glide_to_top(now);
            }
        }
        KeyCode::End | KeyCode::Char('G') => {
            if app.handle_key_press(key) {
                app.glide_to_bottom(now);
            }
        }
        KeyCode::Tab => {
            if app.handle_key_press(key) {
                app.cycle_filter(1, now);
            }
        }
        KeyCode::BackTab => {
            if app.handle_key_press(key) {
                app.cycle_filter(-1, now);
            }
        }
        KeyCode::Char(c @ '1'..='7') => {
            if app.handle_key_press(key) {
                app.jump_to_link((c as usize) - ('1' as usize), now);
            }
        }
        _ => {}
    }
}

/// Handle mouse input: the wheel scrolls the page, overlays ignore it
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.overlay.is_some() {
        return;
    }
    match mouse_event.kind {
        MouseEventKind::ScrollUp => app.scroll_by_px(-LINE_STEP_PX, Instant::now()),
        MouseEventKind::ScrollDown => app.scroll_by_px(LINE_STEP_PX, Instant::now()),
        _ => {}
    }
}
