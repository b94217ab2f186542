// Preference persistence and system color scheme detection
//
// The theme controller talks to these two traits instead of touching the
// filesystem or environment directly. Production wires in the file-backed
// store and the environment probe; tests substitute deterministic doubles.

use crate::theme::ThemeMode;
use std::path::PathBuf;

/// A single-slot string store for the persisted theme token.
///
/// Absence and presence are meaningful states: `load` returning `None`
/// means "nothing persisted, follow the system".
pub trait PreferenceStore: Send {
    /// Read the persisted token, if any
    fn load(&self) -> Option<String>;

    /// Persist a token, replacing any previous value
    fn save(&self, token: &str);

    /// Remove the persisted token entirely
    fn clear(&self);
}

/// File-backed store. One token, one line, one file under the config dir.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: ~/.config/folio/theme
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("folio").join("theme"))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Could not create preference directory: {}", e);
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, format!("{}\n", token)) {
            tracing::warn!("Could not persist theme preference: {}", e);
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Could not clear theme preference: {}", e),
        }
    }
}

/// Source of the ambient system color scheme.
pub trait SystemScheme: Send {
    fn current(&self) -> ThemeMode;
}

/// Best-effort probe of the surrounding desktop/terminal scheme.
///
/// There is no portable "is the system dark" API for terminals, so this
/// reads the conventional hints:
/// - GTK_THEME mentioning "dark" (GNOME and friends)
/// - COLORFGBG's background index (set by several terminal emulators;
///   0-7 are the dark half of the ANSI palette)
///
/// Absent both hints, dark is assumed - the safer default for terminals.
pub struct EnvScheme;

impl SystemScheme for EnvScheme {
    fn current(&self) -> ThemeMode {
        if let Ok(gtk_theme) = std::env::var("GTK_THEME") {
            if gtk_theme.to_lowercase().contains("dark") {
                return ThemeMode::Dark;
            }
            return ThemeMode::Light;
        }

        if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
            if let Some(bg) = colorfgbg.rsplit(';').next() {
                if let Ok(index) = bg.parse::<u8>() {
                    return if index < 8 {
                        ThemeMode::Dark
                    } else {
                        ThemeMode::Light
                    };
                }
            }
        }

        ThemeMode::Dark
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test doubles
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory store sharing its slot with the test that created it
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: std::sync::Arc<std::sync::Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }

    /// Peek at the slot without going through the trait
    pub fn stored(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    fn save(&self, token: &str) {
        *self.slot.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

/// System scheme pinned by the test, flippable mid-test
#[cfg(test)]
#[derive(Clone)]
pub struct FixedScheme {
    mode: std::sync::Arc<std::sync::Mutex<ThemeMode>>,
}

#[cfg(test)]
impl FixedScheme {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode: std::sync::Arc::new(std::sync::Mutex::new(mode)),
        }
    }

    pub fn set(&self, mode: ThemeMode) {
        *self.mode.lock().unwrap() = mode;
    }
}

#[cfg(test)]
impl SystemScheme for FixedScheme {
    fn current(&self) -> ThemeMode {
        *self.mode.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> FilePreferenceStore {
        let path = std::env::temp_dir().join(format!(
            "folio-prefs-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        FilePreferenceStore::new(path)
    }

    #[test]
    fn test_file_store_round_trip() {
        let store = temp_store("round-trip");
        assert_eq!(store.load(), None);

        store.save("dark");
        assert_eq!(store.load(), Some("dark".to_string()));

        store.save("light");
        assert_eq!(store.load(), Some("light".to_string()));

        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let store = temp_store("clear");
        store.clear();
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_ignores_whitespace() {
        let store = temp_store("whitespace");
        store.save("  dark  ");
        // Trailing newline from save plus padding still load as a clean token
        assert_eq!(store.load(), Some("dark".to_string()));
        store.clear();
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), None);
        store.save("light");
        assert_eq!(store.load(), Some("light".to_string()));
        store.clear();
        assert_eq!(store.load(), None);
    }
}
