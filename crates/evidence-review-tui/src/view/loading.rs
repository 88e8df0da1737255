use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{centered_rect, spinner_char};
use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let popup = centered_rect(area.width.min(70), 3, area);
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", spinner_char(app.tick)),
                Style::default().fg(theme.spinner),
            ),
            Span::styled("Loading records\u{2026}", Style::default().fg(theme.text)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            app.source_url.clone(),
            Style::default().fg(theme.dim),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), popup);
}
