//! termdeck Console Library
//!
//! A simulated terminal console hosting nested terminal processes,
//! each with its own command history, prompt and output surface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod session;
pub mod ui;

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::Config;
use crate::session::{CommandDispatcher, Session, SessionManager, SurfaceProvider};

/// Application result type for consistent error handling
pub type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Initialize tracing subscriber writing to `file_path`
///
/// Logs never go to stdout since the console owns the terminal. The returned
/// guard must be kept alive for buffered lines to be flushed.
pub fn init_logging(level: &str, file_path: &str) -> Result<WorkerGuard> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let path = Path::new(file_path);
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Log file path has no file name: {}", file_path))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory: {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("termdeck={}", level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Build a session manager with the built-in commands and launch the root terminal
pub fn boot_console(config: &Config, surfaces: Box<dyn SurfaceProvider>) -> SessionManager {
    let dispatcher = CommandDispatcher::new(Rc::new(commands::builtin_registry(config)));
    let welcome = config.console.welcome();

    let mut manager = SessionManager::new(surfaces);
    let root = manager.launch_process(
        move |surface| Session::new(surface, dispatcher).with_welcome(welcome),
        None,
    );
    tracing::info!("Console booted with root {}", root);

    manager
}
