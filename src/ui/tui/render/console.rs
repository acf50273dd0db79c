use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::themed;
use crate::ui::AppState;
use crate::ui::tui::ConsoleView;

pub(super) fn render_console(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &AppState,
    view: &ConsoleView,
) {
    let mut lines: Vec<Line> = view
        .lines
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();

    if let Some(input) = &view.input {
        lines.push(Line::from(vec![
            Span::styled(
                view.prompt.as_str(),
                themed(
                    app,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ),
            Span::raw(input.as_str()),
        ]));
    }

    let total = lines.len();
    let viewport = area.height.saturating_sub(2) as usize;
    let (start, offset) = visible_window(total, viewport, app.scroll_offset);

    let block = if offset > 0 {
        Block::default()
            .title(format!(" Console (older +{offset}) "))
            .borders(Borders::ALL)
    } else {
        Block::default().title(" Console ").borders(Borders::ALL)
    };

    let visible: Vec<Line> = lines.into_iter().skip(start).take(viewport).collect();
    let rows = visible.len();
    frame.render_widget(Paragraph::new(visible).block(block), area);

    // Cursor only when the input line is on screen
    if let (Some(input), 0) = (&view.input, offset) {
        if rows > 0 && area.width > 2 {
            let typed = view.prompt.chars().count() + input.chars().count();
            let max_x = area.width.saturating_sub(2) as usize;
            let x = area.x + 1 + typed.min(max_x) as u16;
            let y = area.y + rows as u16;
            frame.set_cursor(x, y);
        }
    }
}

/// First visible line and effective offset for a scrolled viewport
fn visible_window(total: usize, viewport: usize, scroll_offset: usize) -> (usize, usize) {
    let max_offset = total.saturating_sub(viewport);
    let offset = scroll_offset.min(max_offset);
    (total.saturating_sub(viewport + offset), offset)
}
