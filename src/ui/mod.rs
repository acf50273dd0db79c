//! User Interface module
//!
//! Provides both the full-screen TUI and a line-oriented console for pipes
//! and dumb terminals.

/// TUI terminal handling, key mapping and rendering
pub mod tui;

/// Line-oriented stdin/stdout console
pub mod cli;

/// In-memory screens for the TUI
pub mod screen;

/// Event loop driving the TUI
pub mod ui_manager;

use colored::Colorize;

use crate::AppResult;
use crate::cli::Cli;
use crate::config::{Config, LastExitPolicy};

pub use screen::{Screen, ScreenDeck, ScreenSurface};
pub use ui_manager::UIManager;

/// Lines moved per PageUp/PageDown
pub const SCROLL_STEP: usize = 5;

/// Application state for UI components
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub should_quit: bool,
    /// Lines scrolled back from the bottom of the focused screen
    pub scroll_offset: usize,
    pub commands_submitted: u64,
    pub restarts: u64,
    pub colors: bool,
}

impl AppState {
    pub fn new(colors: bool) -> Self {
        Self {
            colors,
            ..Self::default()
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(SCROLL_STEP);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_STEP);
    }

    /// Jump back to the live end of the scrollback
    pub fn follow_output(&mut self) {
        self.scroll_offset = 0;
    }
}

/// Print the banner shown in dry-run mode
pub fn display_welcome_page(config: &Config) -> AppResult<()> {
    if !config.ui.enable_colors {
        colored::control::set_override(false);
    }

    println!();
    println!("{}", "termdeck".bold().cyan());
    println!("{}", "Multi-session simulated console".dimmed());
    println!();
    println!(
        "  {} spawn a nested terminal, {} return to its parent",
        "terminal".green(),
        "exit".green()
    );
    println!("  {} list every available command", "help".green());
    println!();

    Ok(())
}

/// Print the effective configuration
pub fn display_configuration(cli: &Cli, config: &Config) -> AppResult<()> {
    let on_last_exit = match config.console.on_last_exit {
        LastExitPolicy::Restart => "restart",
        LastExitPolicy::Quit => "quit",
    };

    println!("{}", "Configuration".bold());
    println!("  Config file:      {}", cli.config_file);
    println!(
        "  Log level:        {}",
        cli.effective_log_level(&config.log_level)
    );
    println!("  Log file:         {}", config.log.file_path);
    println!("  Prompt:           {:?}", config.console.prompt);
    println!(
        "  Welcome command:  {}",
        config.console.welcome().as_deref().unwrap_or("(none)")
    );
    println!("  On last exit:     {}", on_last_exit);
    println!("  Scrollback lines: {}", config.console.scrollback_lines);
    println!("  Identity:         {} ({})", config.identity.name, config.identity.site_url);
    println!("  Refresh rate:     {}ms", config.ui.refresh_rate_ms);
    println!();
    println!("{}", "Dry-run complete, console not started".yellow());

    Ok(())
}
