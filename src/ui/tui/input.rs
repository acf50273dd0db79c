use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::UiAction;
use crate::session::InputEvent;
use crate::ui::{AppState, Screen};

/// Handle keyboard events for TUI, returning actions for the session manager.
///
/// Typing edits the focused screen's input line directly; everything that
/// needs the session (submit, history, clear) comes back as an action.
pub fn handle_key_event(
    app: &mut AppState,
    screen: Option<&mut Screen>,
    key_event: KeyEvent,
) -> UiAction {
    if key_event.kind == KeyEventKind::Release {
        return UiAction::None;
    }

    // Global shortcuts first
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') | KeyCode::Char('d') => {
                app.should_quit = true;
                UiAction::QuitRequested
            }
            KeyCode::Char('l') => UiAction::Input(InputEvent::ClearScreen),
            _ => UiAction::None,
        };
    }

    match key_event.code {
        KeyCode::Enter => match screen.and_then(|screen| screen.input().map(str::to_string)) {
            Some(line) => {
                app.follow_output();
                UiAction::Input(InputEvent::Submit(line))
            }
            None => UiAction::None,
        },
        KeyCode::Up => UiAction::Input(InputEvent::HistoryUp),
        KeyCode::Down => UiAction::Input(InputEvent::HistoryDown),
        KeyCode::PageUp => {
            app.scroll_up();
            UiAction::None
        }
        KeyCode::PageDown => {
            app.scroll_down();
            UiAction::None
        }
        KeyCode::Backspace => {
            if let Some(input) = screen.and_then(Screen::input_mut) {
                input.pop();
            }
            UiAction::None
        }
        KeyCode::Char(c) => {
            if let Some(input) = screen.and_then(Screen::input_mut) {
                input.push(c);
                app.follow_output();
            }
            UiAction::None
        }
        // Tab completion is not supported
        _ => UiAction::None,
    }
}
