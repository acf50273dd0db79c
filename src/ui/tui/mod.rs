//! Terminal User Interface implementation
//!
//! Provides the full-screen console using ratatui.

mod input;
mod render;

use std::io::{Stdout, stdout};

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::{AppState, ScreenDeck};
use crate::AppResult;
use crate::session::{InputEvent, ProcessId, SessionManager};
use crate::ui::ui_manager::RenderState;

pub use input::handle_key_event;
use render::render_root;

/// Actions generated from key handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    None,
    /// Forward to the focused session
    Input(InputEvent),
    QuitRequested,
}

/// One tab in the process bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTab {
    pub id: ProcessId,
    pub parent: Option<ProcessId>,
    pub focused: bool,
}

/// Snapshot of everything a frame needs, taken before drawing
#[derive(Debug, Clone, Default)]
pub struct ConsoleView {
    pub tabs: Vec<ProcessTab>,
    pub lines: Vec<String>,
    pub prompt: String,
    pub input: Option<String>,
}

impl ConsoleView {
    /// Capture the process list and the focused screen
    pub fn capture(manager: &SessionManager, deck: &ScreenDeck) -> Self {
        let active = manager.active_process_id();
        let tabs = manager
            .process_ids()
            .map(|id| ProcessTab {
                id,
                parent: manager.parent_of(id),
                focused: Some(id) == active,
            })
            .collect();

        let mut view = Self {
            tabs,
            ..Self::default()
        };

        if let Some(screen) = active.and_then(|id| deck.screen(id)) {
            let screen = screen.borrow();
            view.lines = screen.lines().iter().cloned().collect();
            view.prompt = screen.prompt().to_string();
            view.input = screen.input().map(str::to_string);
        }

        view
    }

    pub fn focused_tab(&self) -> Option<&ProcessTab> {
        self.tabs.iter().find(|tab| tab.focused)
    }
}

/// RAII helper controlling the terminal lifecycle
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    /// Create a new TUI terminal instance
    pub fn new() -> AppResult<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            cursor::Hide,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal })
    }

    /// Render the application
    pub fn draw(
        &mut self,
        app: &AppState,
        render_state: &RenderState,
        view: &ConsoleView,
    ) -> AppResult<()> {
        self.terminal.draw(|frame| {
            render_root(frame, app, render_state, view);
        })?;
        Ok(())
    }

    /// Restore terminal to canonical mode
    pub fn restore(&mut self) -> AppResult<()> {
        disable_raw_mode()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::Show,
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Attempt to restore the terminal; ignore errors because we are in Drop
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = execute!(
            stdout,
            cursor::Show,
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
    }
}
