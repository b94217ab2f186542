//! Configuration for folio
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/folio/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! The theme choice is deliberately not configured here: it lives in its
//! own persisted preference slot so that toggling from inside the TUI
//! never has to rewrite this file.

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Portfolio content file; `None` falls back to the default location
    /// and then to the built-in sample
    pub portfolio_path: Option<PathBuf>,

    /// Use the palette's background color (true) or the terminal's default
    pub use_theme_background: bool,

    /// How often to re-read the OS color-scheme preference, in seconds
    pub scheme_poll_secs: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portfolio_path: None,
            use_theme_background: true,
            scheme_poll_secs: 1,
            logging: LoggingConfig::default(),
        }
    }
}

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to the TUI buffer)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file rotation strategy
    pub file_rotation: LogRotation,
    /// Prefix for log file names ("folio" -> "folio.2024-01-15.log")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false, // Opt-in feature
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "folio".to_string(),
        }
    }
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::from_str(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub portfolio: Option<String>,
    pub use_theme_background: Option<bool>,
    pub scheme_poll_secs: Option<u64>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/folio/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("folio").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let template = Self::default().to_toml();
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// If config file exists but cannot be parsed. This is intentional -
    /// a broken config should fail fast with a clear error, not silently
    /// fall back to defaults while the user debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!(
                        "\n╔══════════════════════════════════════════════════════════════╗"
                    );
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!(
                        "╚══════════════════════════════════════════════════════════════╝\n"
                    );
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, delete the file and restart folio.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Portfolio file: env > file (the CLI flag overrides both, in main)
        let portfolio_path = std::env::var("FOLIO_PORTFOLIO")
            .ok()
            .or(file.portfolio)
            .map(PathBuf::from);

        // Background handling: file > default
        let use_theme_background = file.use_theme_background.unwrap_or(true);

        // Scheme poll cadence: file > default, floored at one second
        let scheme_poll_secs = file.scheme_poll_secs.unwrap_or(1).max(1);

        let mut logging = LoggingConfig::from_file(file.logging);

        // Log directory: env > file > default
        if let Ok(dir) = std::env::var("FOLIO_LOG_DIR") {
            logging.file_dir = PathBuf::from(dir);
        }

        Self {
            portfolio_path,
            use_theme_background,
            scheme_poll_secs,
            logging,
        }
    }

    /// Serialize to TOML. Single source of truth for the config file
    /// format; `ensure_config_exists` writes exactly this.
    pub fn to_toml(&self) -> String {
        let portfolio_line = match &self.portfolio_path {
            Some(path) => format!("portfolio = \"{}\"", path.display()),
            None => "# portfolio = \"/path/to/portfolio.toml\"".to_string(),
        };

        format!(
            r#"# folio configuration

# Portfolio content file (FOLIO_PORTFOLIO env var overrides)
# Defaults to ~/.config/folio/portfolio.toml, or the built-in sample
{portfolio_line}

# Use the palette's background color (true) or the terminal's default (false)
use_theme_background = {use_bg}

# How often to re-read the OS color-scheme preference, in seconds
scheme_poll_secs = {poll}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to the in-TUI log view)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            portfolio_line = portfolio_line,
            use_bg = self.use_theme_background,
            poll = self.scheme_poll_secs,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses_back_to_defaults() {
        let template = Config::default().to_toml();
        let file: FileConfig = toml::from_str(&template).expect("template must parse");

        assert!(file.portfolio.is_none());
        assert_eq!(file.use_theme_background, Some(true));
        assert_eq!(file.scheme_poll_secs, Some(1));

        let logging = LoggingConfig::from_file(file.logging);
        let defaults = LoggingConfig::default();
        assert_eq!(logging.level, defaults.level);
        assert_eq!(logging.file_enabled, defaults.file_enabled);
        assert_eq!(logging.file_dir, defaults.file_dir);
        assert_eq!(logging.file_rotation, defaults.file_rotation);
        assert_eq!(logging.file_prefix, defaults.file_prefix);
    }

    #[test]
    fn test_explicit_portfolio_serializes_uncommented() {
        let config = Config {
            portfolio_path: Some(PathBuf::from("/tmp/me.toml")),
            ..Config::default()
        };
        let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(file.portfolio.as_deref(), Some("/tmp/me.toml"));
    }

    #[test]
    fn test_rotation_parse_is_lenient() {
        assert_eq!(LogRotation::from_str("hourly"), LogRotation::Hourly);
        assert_eq!(LogRotation::from_str("NEVER"), LogRotation::Never);
        assert_eq!(LogRotation::from_str("sometimes"), LogRotation::Daily);
    }

    #[test]
    fn test_partial_logging_section_keeps_other_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
[logging]
level = "debug"
"#,
        )
        .unwrap();
        let logging = LoggingConfig::from_file(file.logging);
        assert_eq!(logging.level, "debug");
        assert!(!logging.file_enabled);
        assert_eq!(logging.file_prefix, "folio");
    }
}
