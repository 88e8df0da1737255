use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered_rect;
use crate::theme::Theme;

/// Render the quit confirmation dialog as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme, unsaved: bool) {
    let area = f.area();
    let popup = centered_rect(44, if unsaved { 6 } else { 5 }, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Quit evidence review?",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
    ];
    if unsaved {
        lines.push(Line::from(Span::styled(
            "  Unsaved edits will be sent before exit.",
            Style::default().fg(theme.pending),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(
            "  q",
            Style::default()
                .fg(theme.not_ok)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": quit   ", Style::default().fg(theme.dim)),
        Span::styled(
            "Esc",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": cancel", Style::default().fg(theme.dim)),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.not_ok))
            .title(" Confirm Quit "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
