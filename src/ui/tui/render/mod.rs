mod console;
mod header;
mod hints;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;

use super::ConsoleView;
use crate::ui::AppState;
use crate::ui::ui_manager::RenderState;

use self::console::render_console;
use self::header::render_header;
use self::hints::render_hints;

pub(super) fn render_root(
    frame: &mut Frame<'_>,
    app: &AppState,
    render_state: &RenderState,
    view: &ConsoleView,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.size());

    render_header(frame, chunks[0], app, view);
    render_console(frame, chunks[1], app, view);
    render_hints(frame, chunks[2], app, render_state);
}

/// Drop styling when colors are disabled
fn themed(app: &AppState, style: Style) -> Style {
    if app.colors { style } else { Style::default() }
}
