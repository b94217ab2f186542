// folio - a personal portfolio page for the terminal
//
// The classic single-page portfolio, rebuilt as a TUI: a fixed navbar over
// a scrollable document, smooth section routing, a project filter with
// staggered card transitions, reveal-on-scroll, a persisted theme that
// follows the system scheme until overridden, and a contact form that
// hands off to the system mail client.
//
// Architecture:
// - content: portfolio data, loaded from TOML or the built-in sample
// - page: the document model with row-level layout and virtual geometry
// - behavior: scrolling, routing, scrollspy, filter, reveal, theme, contact
// - tui (ratatui): event loop, key dispatch, rendering

mod behavior;
mod cli;
mod config;
mod content;
mod logging;
mod page;
mod theme;
mod tui;

use anyhow::Result;
use cli::CliAction;
use config::{Config, LogRotation};
use content::Portfolio;
use logging::{CaptureLayer, LogBuffer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI subcommands first (config/theme management)
    // If a command was handled, exit early
    let portfolio_flag = match cli::handle_cli() {
        CliAction::Handled => return Ok(()),
        CliAction::Run { portfolio } => portfolio,
    };

    // Ensure the config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();
    let log_buffer = LogBuffer::new();

    // Logs are captured to the in-app buffer, never written to stdout:
    // the alternate screen owns the terminal while the TUI runs.
    // File logging optionally writes to rotating log files on top.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("folio={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program to
    // ensure file logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Err(e) => {
                    eprintln!(
                        "Warning: Could not create log directory {:?}: {}",
                        config.logging.file_dir, e
                    );
                    // Fall back to buffer-only logging
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(CaptureLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
                Ok(()) => {
                    let file_appender = match config.logging.file_rotation {
                        LogRotation::Hourly => tracing_appender::rolling::hourly(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Daily => tracing_appender::rolling::daily(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Never => tracing_appender::rolling::never(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                    };

                    // Writes happen on a background thread; JSON format for
                    // structured parsing later
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(CaptureLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                    Some(guard)
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(CaptureLayer::new(log_buffer.clone()))
                .init();
            None
        };

    // CLI flag > config file > default location > built-in sample
    let explicit = portfolio_flag.or_else(|| config.portfolio_path.clone());
    let portfolio = Portfolio::resolve(explicit.as_ref())?;

    tracing::info!(
        name = %portfolio.name,
        projects = portfolio.projects.len(),
        "portfolio loaded"
    );

    if let Err(e) = tui::run_tui(config, portfolio, log_buffer).await {
        tracing::error!("TUI error: {:?}", e);
        return Err(e);
    }

    Ok(())
}
