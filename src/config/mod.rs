//! Configuration management module
//!
//! Handles loading, validation, and management of application configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Logging level
    pub log_level: String,

    /// Console behavior
    pub console: ConsoleConfig,

    /// Values reported by the built-in commands
    pub identity: IdentityConfig,

    /// UI-specific configuration
    pub ui: UiConfig,

    /// File-based logging configuration
    pub log: LogConfig,
}

/// What to do once the last console process has exited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LastExitPolicy {
    /// Rebuild the console from scratch with a fresh root session
    Restart,
    /// Leave the application
    Quit,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Prompt shown in front of the input line
    pub prompt: String,

    /// Command run once when a session starts; empty disables it
    pub welcome_command: String,

    /// Behavior after the last process exits
    pub on_last_exit: LastExitPolicy,

    /// Maximum lines kept per session screen
    pub scrollback_lines: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Name reported by `whoami`
    pub name: String,

    /// URL reported by `pwd`
    pub site_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable colors in TUI
    pub enable_colors: bool,

    /// Redraw cadence in milliseconds
    pub refresh_rate_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Absolute or relative path to the log file
    pub file_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            console: ConsoleConfig::default(),
            identity: IdentityConfig::default(),
            ui: UiConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "guest:~$ ".to_string(),
            welcome_command: "motd".to_string(),
            on_last_exit: LastExitPolicy::Restart,
            scrollback_lines: 1000,
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: "Guest".to_string(),
            site_url: "https://localhost".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_colors: true,
            refresh_rate_ms: 100,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_path: "logs/termdeck.log".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Welcome command for new sessions, `None` when disabled
    pub fn welcome(&self) -> Option<String> {
        let name = self.welcome_command.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // TERMDECK_LOG_LEVEL - logging level
        if let Some(log_level) = lookup("TERMDECK_LOG_LEVEL") {
            self.log_level = log_level;
        }

        // TERMDECK_LOG_FILE_PATH - logging destination file
        if let Some(file_path) = lookup("TERMDECK_LOG_FILE_PATH") {
            if !file_path.trim().is_empty() {
                self.log.file_path = file_path;
            }
        }

        // TERMDECK_PROMPT - prompt text
        if let Some(prompt) = lookup("TERMDECK_PROMPT") {
            self.console.prompt = prompt;
        }

        // TERMDECK_WELCOME_COMMAND - startup command, empty to disable
        if let Some(welcome) = lookup("TERMDECK_WELCOME_COMMAND") {
            self.console.welcome_command = welcome;
        }

        // TERMDECK_ON_LAST_EXIT - restart | quit
        if let Some(policy) = lookup("TERMDECK_ON_LAST_EXIT") {
            match policy.trim().to_lowercase().as_str() {
                "restart" => self.console.on_last_exit = LastExitPolicy::Restart,
                "quit" => self.console.on_last_exit = LastExitPolicy::Quit,
                other => tracing::warn!("Ignoring unknown TERMDECK_ON_LAST_EXIT value: {}", other),
            }
        }

        // TERMDECK_SCROLLBACK_LINES - per-session scrollback
        if let Some(lines) = lookup("TERMDECK_SCROLLBACK_LINES") {
            if let Ok(value) = lines.parse::<usize>() {
                self.console.scrollback_lines = value;
            }
        }

        // TERMDECK_IDENTITY_NAME - whoami output
        if let Some(name) = lookup("TERMDECK_IDENTITY_NAME") {
            self.identity.name = name;
        }

        // TERMDECK_IDENTITY_SITE_URL - pwd output
        if let Some(url) = lookup("TERMDECK_IDENTITY_SITE_URL") {
            self.identity.site_url = url;
        }

        // TERMDECK_UI_ENABLE_COLORS - enable colors
        if let Some(enable_colors) = lookup("TERMDECK_UI_ENABLE_COLORS") {
            self.ui.enable_colors = enable_colors.parse().unwrap_or(self.ui.enable_colors);
        }

        // TERMDECK_UI_REFRESH_RATE_MS - redraw cadence
        if let Some(refresh) = lookup("TERMDECK_UI_REFRESH_RATE_MS") {
            if let Ok(value) = refresh.parse::<u64>() {
                self.ui.refresh_rate_ms = value;
            }
        }
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path).unwrap_or_else(|err| {
            tracing::warn!("Failed to load config: {}, using defaults", err);
            let mut config = Self::default();
            config.apply_env_overrides();
            config
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.console.scrollback_lines == 0 {
            anyhow::bail!("console.scrollback_lines must be greater than 0");
        }

        if self.ui.refresh_rate_ms == 0 {
            anyhow::bail!("ui.refresh_rate_ms must be greater than 0");
        }

        if self.log.file_path.trim().is_empty() {
            anyhow::bail!("Log file path must not be empty");
        }

        if self
            .console
            .welcome_command
            .trim()
            .contains(char::is_whitespace)
        {
            anyhow::bail!(
                "console.welcome_command must be a single command name: {}",
                self.console.welcome_command
            );
        }

        if let Some(welcome) = self.console.welcome() {
            if crate::commands::PROCESS_COMMANDS.contains(&welcome.as_str()) {
                anyhow::bail!(
                    "console.welcome_command cannot be '{}': it starts or stops processes",
                    welcome
                );
            }
        }

        Ok(())
    }

    /// Render configuration as TOML for display
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Handle configuration command
    pub fn handle_command<P: AsRef<Path>>(
        action: &Option<crate::cli::ConfigAction>,
        path: P,
    ) -> Result<()> {
        match action {
            Some(crate::cli::ConfigAction::Show) => {
                let config = Config::load_or_default(&path);
                print!("{}", config.to_toml()?);
            }
            Some(crate::cli::ConfigAction::Reset) => {
                Config::default().save_to_file(&path)?;
                println!("Configuration reset: {}", path.as_ref().display());
            }
            None => {
                println!("Configuration management commands:");
                println!("  termdeck config show    - Show current configuration");
                println!("  termdeck config reset   - Reset to default configuration");
            }
        }
        Ok(())
    }
}
