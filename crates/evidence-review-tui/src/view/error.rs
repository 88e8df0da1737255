use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::centered_rect;
use crate::theme::Theme;

/// Full-screen error shown when the records could not be loaded.
pub fn render(f: &mut Frame, area: Rect, theme: &Theme, message: &str) {
    let popup = centered_rect(area.width.min(72), area.height.min(9), area);
    let lines = vec![
        Line::from(Span::styled(
            "Could not load records",
            Style::default()
                .fg(theme.not_ok)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "r",
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": reload   ", Style::default().fg(theme.dim)),
            Span::styled(
                "q",
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": quit", Style::default().fg(theme.dim)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.not_ok))
                .title(" Error "),
        );
    f.render_widget(paragraph, popup);
}
