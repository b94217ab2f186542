// TUI application state
//
// App owns the page and its behavior controllers and wires their
// choreography: scroll movement drives the nav shadow, the coalesced
// scrollspy pass and the reveal check; filter selections drive relayout;
// the theme controller applies the stored choice and follows the system
// scheme while no choice is stored.

use super::components::Toast;
use super::form::FormState;
use super::input::InputHandler;
use crate::behavior::contact;
use crate::behavior::filter::ProjectFilter;
use crate::behavior::nav;
use crate::behavior::prefs::{EnvScheme, FilePreferenceStore, PreferenceStore, SystemScheme};
use crate::behavior::reveal::RevealObserver;
use crate::behavior::scroll::{apply_scroll_effects, ScrollState};
use crate::behavior::scrollspy::Scrollspy;
use crate::behavior::theme_ctl::ThemeController;
use crate::config::Config;
use crate::content::Portfolio;
use crate::logging::LogBuffer;
use crate::page::{Page, ROW_PX};
use crate::theme::{Palette, ThemeMode};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Virtual pixels moved by one line-scroll key
pub const LINE_STEP_PX: f32 = 3.0 * ROW_PX;

/// A dialog layered over the page; at most one is up at a time
pub enum Overlay {
    Help,
    Logs,
    Contact(FormState),
}

/// Main application state for the TUI
pub struct App {
    pub config: Config,
    pub portfolio: Portfolio,

    /// The rendered page: nav, elements, layout
    pub page: Page,

    /// Scroll position over the page's virtual pixels
    pub scroll: ScrollState,

    /// Theme persistence and system-scheme follow
    pub theme: ThemeController,

    /// Frame-coalesced active-section tracking
    pub spy: Scrollspy,

    /// Project filter with its deferred card steps
    pub filter: ProjectFilter,

    /// One-way reveal-on-scroll flags
    pub reveal: RevealObserver,

    /// Currently open dialog, if any
    pub overlay: Option<Overlay>,

    /// Cursor row inside the nav menu panel
    pub menu_cursor: usize,

    /// Mirrors the navbar switch position (checked means dark)
    pub switch_dark: bool,

    pub toast: Option<Toast>,
    pub should_quit: bool,

    /// Log buffer backing the log overlay
    pub log_buffer: LogBuffer,

    /// Timestamp of the current frame, drives tween sampling
    pub now: Instant,

    input_handler: InputHandler,
    last_scheme_poll: Instant,
    term_width: u16,
    term_height: u16,
}

impl App {
    /// Build the app against the real preference store and scheme probe
    pub fn new(
        config: Config,
        portfolio: Portfolio,
        log_buffer: LogBuffer,
        width: u16,
        height: u16,
    ) -> Self {
        let path = FilePreferenceStore::default_path()
            .unwrap_or_else(|| PathBuf::from(".folio-theme"));
        Self::with_theme_sources(
            config,
            portfolio,
            log_buffer,
            width,
            height,
            Box::new(FilePreferenceStore::new(path)),
            Box::new(EnvScheme),
        )
    }

    /// Build the app with explicit theme sources; tests inject doubles here
    pub fn with_theme_sources(
        config: Config,
        portfolio: Portfolio,
        log_buffer: LogBuffer,
        width: u16,
        height: u16,
        store: Box<dyn PreferenceStore>,
        system: Box<dyn SystemScheme>,
    ) -> Self {
        let now = Instant::now();
        let mut page = Page::build(&portfolio, width);

        let theme = ThemeController::new(store, system);
        theme.load_initial(&mut page);

        let mut scroll = ScrollState::new();
        scroll.set_bounds(page.layout.height_px(), doc_viewport_px(height));

        let spy = Scrollspy::new(&page);
        let mut reveal = RevealObserver::new();
        reveal.observe(&mut page);

        let mut app = Self {
            config,
            portfolio,
            page,
            scroll,
            theme,
            spy,
            filter: ProjectFilter::new(),
            reveal,
            overlay: None,
            menu_cursor: 0,
            switch_dark: false,
            toast: None,
            should_quit: false,
            log_buffer,
            now,
            input_handler: InputHandler::with_default_config(),
            last_scheme_poll: now,
            term_width: width,
            term_height: height,
        };
        app.switch_dark = app.effective_mode() == ThemeMode::Dark;

        // Load pass: nav shadow, above-the-fold reveals, initial spy run
        apply_scroll_effects(&mut app.page, 0.0);
        app.reveal
            .check(&mut app.page, 0.0, app.scroll.viewport_px(), now);
        app.spy.recompute(&mut app.page, 0.0);
        app
    }

    /// Advance time-driven state by one frame
    pub fn tick(&mut self, now: Instant) {
        self.now = now;

        if self.scroll.tick(now) {
            self.after_scroll_change(now);
        }
        if self.filter.tick(&mut self.page, now) {
            self.relayout(now);
        }
        self.spy.run_pending(&mut self.page, self.scroll.offset_px());
        self.poll_scheme(now);

        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Everything that reacts to the offset moving
    fn after_scroll_change(&mut self, now: Instant) {
        let offset = self.scroll.offset_px();
        apply_scroll_effects(&mut self.page, offset);
        self.spy.schedule();
        self.reveal
            .check(&mut self.page, offset, self.scroll.viewport_px(), now);
    }

    /// Rebuild the row plan after element visibility changed
    fn relayout(&mut self, now: Instant) {
        self.page.relayout(&self.portfolio, self.term_width);
        self.scroll
            .set_bounds(self.page.layout.height_px(), doc_viewport_px(self.term_height));
        let offset = self.scroll.offset_px();
        apply_scroll_effects(&mut self.page, offset);
        self.reveal
            .check(&mut self.page, offset, self.scroll.viewport_px(), now);
    }

    /// Follow the system scheme at the configured cadence
    fn poll_scheme(&mut self, now: Instant) {
        let interval = Duration::from_secs(self.config.scheme_poll_secs);
        if now.duration_since(self.last_scheme_poll) < interval {
            return;
        }
        self.last_scheme_poll = now;
        if self.theme.poll_system(&mut self.page) {
            self.sync_switch();
        }
    }

    /// Resize reflows the document and recomputes the spy in the same pass
    pub fn handle_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.term_width = width;
        self.term_height = height;
        self.page.relayout(&self.portfolio, width);
        self.scroll
            .set_bounds(self.page.layout.height_px(), doc_viewport_px(height));
        let offset = self.scroll.offset_px();
        apply_scroll_effects(&mut self.page, offset);
        self.spy.recompute(&mut self.page, offset);
        self.reveal
            .check(&mut self.page, offset, self.scroll.viewport_px(), now);
    }

    // ── scrolling ────────────────────────────────────────────────────────

    pub fn scroll_by_px(&mut self, delta_px: f32, now: Instant) {
        if self.scroll.scroll_by(delta_px) {
            self.after_scroll_change(now);
        }
    }

    pub fn half_page_px(&self) -> f32 {
        (self.scroll.viewport_px() / 2.0).max(ROW_PX)
    }

    pub fn glide_to_top(&mut self, now: Instant) {
        self.scroll.glide_to(0.0, now);
    }

    pub fn glide_to_bottom(&mut self, now: Instant) {
        self.scroll.glide_to(self.scroll.max_offset(), now);
    }

    /// Jump key: activate the nth nav link, as if it had been clicked
    pub fn jump_to_link(&mut self, index: usize, now: Instant) {
        let Some(link) = self.page.nav.links.get(index) else {
            return;
        };
        let id = link.id;
        nav::activate_link(&mut self.page, &mut self.scroll, id, now);
    }

    // ── nav menu ─────────────────────────────────────────────────────────

    pub fn toggle_menu(&mut self) {
        nav::toggle_menu(&mut self.page);
        if self.page.nav.menu_open {
            self.menu_cursor = self
                .page
                .active_link()
                .and_then(|id| self.page.nav.links.iter().position(|l| l.id == id))
                .unwrap_or(0);
        }
    }

    pub fn close_menu(&mut self) {
        nav::close_menu(&mut self.page);
    }

    pub fn menu_move(&mut self, delta: i32) {
        let len = self.page.nav.links.len();
        if len == 0 {
            return;
        }
        self.menu_cursor = (self.menu_cursor as i32 + delta).rem_euclid(len as i32) as usize;
    }

    pub fn menu_activate(&mut self, now: Instant) {
        let Some(link) = self.page.nav.links.get(self.menu_cursor) else {
            return;
        };
        let id = link.id;
        nav::activate_link(&mut self.page, &mut self.scroll, id, now);
    }

    // ── theme ────────────────────────────────────────────────────────────

    pub fn effective_mode(&self) -> ThemeMode {
        self.theme.effective(&self.page)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.effective_mode())
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle(&mut self.page);
        self.sync_switch();
    }

    /// The navbar switch: flipping it stores an explicit choice
    pub fn flip_switch(&mut self) {
        let mode = if self.switch_dark {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        };
        self.theme.set_explicit(&mut self.page, mode);
        self.sync_switch();
    }

    fn sync_switch(&mut self) {
        self.switch_dark = self.effective_mode() == ThemeMode::Dark;
    }

    // ── filter ───────────────────────────────────────────────────────────

    /// Move the active filter chip by `delta` and apply the selection
    pub fn cycle_filter(&mut self, delta: i32, now: Instant) {
        let len = self.page.filters.len();
        if len == 0 {
            return;
        }
        let current = self
            .page
            .filters
            .iter()
            .position(|c| c.active)
            .unwrap_or(0);
        let next = (current as i32 + delta).rem_euclid(len as i32) as usize;
        let tag = self.page.filters[next].tag.clone();
        if self.filter.select(&mut self.page, &tag, now) {
            self.relayout(now);
        }
    }

    // ── contact ──────────────────────────────────────────────────────────

    pub fn open_contact(&mut self) {
        if self.portfolio.contact.is_some() {
            self.overlay = Some(Overlay::Contact(FormState::new()));
        } else {
            self.notify_error("No contact on this page");
        }
    }

    /// Compose the mailto URI from the form and hand it to the mail client
    pub fn submit_contact(&mut self) {
        let Some(Overlay::Contact(form)) = &mut self.overlay else {
            return;
        };
        let Some(recipient) = contact::recipient(self.portfolio.contact.as_ref()) else {
            return;
        };
        let uri = form.form.submit(recipient);
        tracing::info!(subject_len = form.form.subject.len(), "message handed to mail client");
        contact::launch(&uri);
        self.overlay = None;
        self.notify("Handed off to your mail client");
    }

    pub fn copy_email(&mut self) {
        let Some(recipient) = contact::recipient(self.portfolio.contact.as_ref()) else {
            self.notify_error("No contact on this page");
            return;
        };
        match copy_to_clipboard(recipient) {
            Ok(()) => self.notify("Email address copied"),
            Err(err) => {
                tracing::warn!("clipboard copy failed: {err:#}");
                self.notify_error("Clipboard unavailable");
            }
        }
    }

    // ── input plumbing ───────────────────────────────────────────────────

    /// Handle a key press, returns true if the action should trigger
    pub fn handle_key_press(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    /// Handle a key release
    pub fn handle_key_release(&mut self, key: crossterm::event::KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::error(message));
    }
}

/// Document viewport height in virtual pixels; one row goes to the status bar
fn doc_viewport_px(height: u16) -> f32 {
    height.saturating_sub(1) as f32 * ROW_PX
}

/// Copy text to the system clipboard
///
/// The clipboard is created fresh each call to avoid holding resources.
/// Common failure cases: no display server, permission denied.
fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
