use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::themed;
use crate::ui::AppState;
use crate::ui::ui_manager::RenderState;

const KEY_HINTS: &[(&str, &str)] = &[
    ("Enter", "run"),
    ("Up/Down", "history"),
    ("Ctrl+L", "clear"),
    ("PgUp/PgDn", "scroll"),
    ("Ctrl+C", "quit"),
];

pub(super) fn render_hints(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &AppState,
    render_state: &RenderState,
) {
    let mut spans = Vec::new();

    if let Some(info) = &render_state.info_message {
        spans.push(Span::styled(
            format!("{} ", info),
            themed(app, Style::default().fg(Color::LightBlue)),
        ));
    }

    for (key, action) in KEY_HINTS {
        spans.push(Span::styled(
            format!(" {} ", key),
            themed(app, Style::default().fg(Color::Cyan)),
        ));
        spans.push(Span::styled(
            format!("{} ", action),
            themed(app, Style::default().fg(Color::Gray)),
        ));
    }

    let block = Block::default().borders(Borders::ALL).title(" Keys ");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
