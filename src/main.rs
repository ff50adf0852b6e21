//! tvnav - Spatial remote-control navigation for web-based TV interfaces
//!
//! Main entry point for the tvnav CLI and status service.

mod cli;
mod cmd_config;
mod cmd_replay;
mod server;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tvnav_config::ConfigLoader;

use cli::{Cli, Commands};

/// Get the tvnav data directory (~/.tvnav).
fn tvnav_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".tvnav"))
        .unwrap_or_else(|| PathBuf::from(".tvnav"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.tvnav/logs/ with daily rotation. The console
/// layer writes to stderr so `replay` output on stdout stays machine-readable.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = tvnav_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("tvnav")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes buffered file output when the program exits.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    info!("Configuration: {}", cli.config.display());

    match cli.command {
        None => {
            cmd_config::ensure_valid(&config)?;
            server::run_server(config, None).await
        }
        Some(Commands::Serve { host, port, page }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_config::ensure_valid(&config)?;
            let page = page.map(|path| ConfigLoader::expand_path(&path));
            server::run_server(config, page).await
        }
        Some(Commands::Replay { page, keys }) => {
            cmd_config::ensure_valid(&config)?;
            cmd_replay::run_replay(&config, &ConfigLoader::expand_path(&page), &keys)
        }
        Some(Commands::CheckConfig) => cmd_config::check_config(&config, &cli.config),
    }
}
