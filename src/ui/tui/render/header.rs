use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::themed;
use crate::ui::AppState;
use crate::ui::tui::ConsoleView;

pub(super) fn render_header(frame: &mut Frame<'_>, area: Rect, app: &AppState, view: &ConsoleView) {
    let mut spans = vec![
        Span::styled(
            " termdeck ",
            themed(
                app,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ),
        Span::raw(" "),
    ];

    for tab in &view.tabs {
        let label = format!(" {} ", tab.id);
        let style = match (tab.focused, app.colors) {
            (true, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().add_modifier(Modifier::REVERSED),
            (false, _) => themed(app, Style::default().fg(Color::Gray)),
        };
        spans.push(Span::styled(label, style));
    }

    let lineage = match view.focused_tab().and_then(|tab| tab.parent) {
        Some(parent) => format!(" parent: {} ", parent),
        None => " root ".to_string(),
    };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(lineage, themed(app, Style::default().fg(Color::Yellow))));
    spans.push(Span::styled(
        format!(
            "| Cmds: {} | Restarts: {} ",
            app.commands_submitted, app.restarts
        ),
        themed(app, Style::default().fg(Color::Gray)),
    ));

    let block = Block::default().borders(Borders::ALL).title(" Processes ");
    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
