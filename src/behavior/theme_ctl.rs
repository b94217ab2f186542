// Theme controller
//
// Owns the persisted preference and its relationship to the ambient system
// scheme. The rules, in order:
//
// - A persisted choice always wins and survives restarts.
// - With nothing persisted, the page follows the system scheme, including
//   live changes while running.
// - Toggling flips the currently *effective* mode and persists the result,
//   which also stops the page from following the system.
//
// The controller only ever writes the page's theme marker; resolving the
// marker to a palette happens at render time.

use super::prefs::{PreferenceStore, SystemScheme};
use crate::page::Page;
use crate::theme::ThemeMode;

pub struct ThemeController {
    store: Box<dyn PreferenceStore>,
    system: Box<dyn SystemScheme>,
    /// Last observed system scheme, for change detection
    last_system: ThemeMode,
}

impl ThemeController {
    pub fn new(store: Box<dyn PreferenceStore>, system: Box<dyn SystemScheme>) -> Self {
        let last_system = system.current();
        Self {
            store,
            system,
            last_system,
        }
    }

    /// The persisted preference, if a valid token is stored
    pub fn stored(&self) -> Option<ThemeMode> {
        self.store.load().and_then(|t| ThemeMode::parse(&t))
    }

    /// The mode the page currently presents: the explicit marker if one
    /// is set, otherwise the system scheme.
    pub fn effective(&self, page: &Page) -> ThemeMode {
        page.theme_attr.unwrap_or_else(|| self.system.current())
    }

    /// Write the page marker: an explicit mode, or `None` to fall back
    /// to the system scheme.
    pub fn apply(page: &mut Page, mode: Option<ThemeMode>) {
        page.theme_attr = mode;
    }

    /// Initialize the marker from the store. Unknown or missing tokens
    /// leave the marker unset so the page follows the system.
    pub fn load_initial(&self, page: &mut Page) {
        Self::apply(page, self.stored());
        tracing::debug!(
            "Theme initialized: {} ({})",
            self.effective(page).name(),
            if page.theme_attr.is_some() {
                "persisted"
            } else {
                "system"
            }
        );
    }

    /// Flip the effective mode, mark the page, and persist the choice.
    pub fn toggle(&self, page: &mut Page) {
        let next = self.effective(page).flipped();
        Self::apply(page, Some(next));
        self.store.save(next.as_str());
        tracing::info!("Theme toggled to {}", next.name());
    }

    /// Set an explicit mode (the menu switch path): mark and persist.
    pub fn set_explicit(&self, page: &mut Page, mode: ThemeMode) {
        Self::apply(page, Some(mode));
        self.store.save(mode.as_str());
        tracing::info!("Theme set to {}", mode.name());
    }

    /// Sample the system scheme and react to a change.
    ///
    /// A change only affects the page while no preference is persisted;
    /// in that case the marker is updated to the new system value without
    /// persisting anything. Returns whether the page changed.
    pub fn poll_system(&mut self, page: &mut Page) -> bool {
        let current = self.system.current();
        if current == self.last_system {
            return false;
        }
        self.last_system = current;

        if self.stored().is_some() {
            return false;
        }
        Self::apply(page, Some(current));
        tracing::debug!("Following system scheme change to {}", current.name());
        true
    }
}
