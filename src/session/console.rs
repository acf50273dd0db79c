//! A single interactive console session

use tracing::debug;

use super::command_router::CommandDispatcher;
use super::history::HistoryLedger;
use super::surface::Surface;

/// Default command executed once when a session starts
pub const DEFAULT_WELCOME_COMMAND: &str = "motd";

/// One console instance: history, dispatcher and its own surface.
///
/// Sessions are owned by the [`SessionManager`](super::SessionManager), which
/// routes input to the focused one and drives submission.
pub struct Session {
    history: HistoryLedger,
    dispatcher: CommandDispatcher,
    surface: Box<dyn Surface>,
    welcome: Option<String>,
}

impl Session {
    /// Create a session that runs `motd` at startup if it is registered
    pub fn new(surface: Box<dyn Surface>, dispatcher: CommandDispatcher) -> Self {
        Self {
            history: HistoryLedger::new(),
            dispatcher,
            surface,
            welcome: Some(DEFAULT_WELCOME_COMMAND.to_string()),
        }
    }

    /// Override the startup command; `None` disables it
    pub fn with_welcome(mut self, welcome: Option<String>) -> Self {
        self.welcome = welcome;
        self
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    pub fn welcome(&self) -> Option<&str> {
        self.welcome.as_deref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }

    /// Show non-empty text on this session's surface
    pub fn display(&mut self, text: &str) {
        if !text.is_empty() {
            self.surface.display_output(text);
        }
    }

    /// Show a fresh input line
    pub fn prompt(&mut self) {
        self.surface.show_input_line();
    }

    /// First half of a submission: trim, record and freeze the line.
    ///
    /// Returns the trimmed line to dispatch, or `None` for blank input, in
    /// which case the session has already re-prompted.
    pub(crate) fn accept_line(&mut self, raw_line: &str) -> Option<String> {
        let line = raw_line.trim();
        if line.is_empty() {
            self.surface.replace_input_with_text("");
            self.surface.show_input_line();
            return None;
        }

        debug!("Accepted input line: {}", line);
        self.history.add(line);
        self.surface.replace_input_with_text(line);
        Some(line.to_string())
    }

    /// Arrow-up: recall the previous history entry
    pub fn recall_previous(&mut self) {
        if let Some(entry) = self.history.previous() {
            self.surface.set_input_text(entry);
        }
    }

    /// Arrow-down: recall the next entry, blanking the input past the newest
    pub fn recall_next(&mut self) {
        if let Some(entry) = self.history.next() {
            self.surface.set_input_text(entry);
        }
    }

    /// Wipe the surface and put a fresh prompt back
    pub fn clear_screen(&mut self) {
        self.surface.clear();
        self.surface.show_input_line();
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.surface.set_visible(focused);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("history", &self.history)
            .field("welcome", &self.welcome)
            .finish_non_exhaustive()
    }
}
