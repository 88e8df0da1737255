use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::truncate;
use crate::model::toast::ToastState;
use crate::theme::Theme;

/// Stack live notifications in the top-right corner, newest at the bottom.
pub fn render(f: &mut Frame, area: Rect, toasts: &ToastState, theme: &Theme) {
    if toasts.is_empty() {
        return;
    }
    let width = 40.min(area.width);
    let mut y = area.y + 1;
    for toast in toasts.iter() {
        if y + 3 > area.y + area.height {
            break;
        }
        let rect = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height: 3,
        };
        let color = theme.toast_color(toast.kind);
        let text = truncate(&toast.message, width.saturating_sub(4) as usize);
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {text}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
        y += 3;
    }
}
