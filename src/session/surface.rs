//! Rendering surface contract between sessions and the front-end

use super::session_manager::ProcessId;

/// Output/input area owned by one session.
///
/// Implemented by the front-end. Dropping the handle releases the area.
pub trait Surface {
    /// Append output text below the existing content
    fn display_output(&mut self, text: &str);

    /// Show a fresh, empty, editable input line
    fn show_input_line(&mut self);

    /// Replace the text of the current input line (history recall)
    fn set_input_text(&mut self, text: &str);

    /// Freeze the current input line as non-editable output showing `text`
    fn replace_input_with_text(&mut self, text: &str);

    /// Show or hide the area; a visible surface owns keyboard focus
    fn set_visible(&mut self, visible: bool);

    /// Remove all content, including the input line
    fn clear(&mut self);
}

/// Provisions a new visible area for each launched process
pub trait SurfaceProvider {
    fn create_surface(&mut self, id: ProcessId) -> Box<dyn Surface>;
}

/// Input events delivered to the focused session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Enter pressed with the given input line
    Submit(String),
    /// Arrow-up
    HistoryUp,
    /// Arrow-down
    HistoryDown,
    /// Ctrl+L
    ClearScreen,
}
