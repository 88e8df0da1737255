use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use evidence_review_core::{FlagField, columns};

use super::truncate;
use crate::app::App;

/// Sidebar listing every record with its three flag marks. The current
/// record is marked with `>`; the highlight follows the list cursor.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(session) = &app.session else {
        return;
    };

    let name_width = (area.width as usize).saturating_sub(14);
    let items: Vec<ListItem> = session
        .records()
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let marker = if i == session.cursor() { ">" } else { " " };
            let mut spans = vec![Span::styled(
                format!("{marker}{:>4} ", i + 1),
                Style::default().fg(theme.dim),
            )];
            for &field in FlagField::all() {
                spans.push(Span::styled(
                    "\u{25CF}",
                    Style::default().fg(theme.flag_color(record.flag(field))),
                ));
            }
            spans.push(Span::styled(
                format!(" {}", truncate(record.get(columns::NOMBRE_A_VALIDAR), name_width)),
                Style::default().fg(theme.text),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Records "),
        )
        .highlight_style(theme.highlight_style());

    let mut state = ListState::default().with_selected(Some(app.list_cursor));
    f.render_stateful_widget(list, area, &mut state);
}
