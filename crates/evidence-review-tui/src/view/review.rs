use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use evidence_review_core::{FlagField, Record, columns};

use crate::app::App;
use crate::theme::Theme;

/// Top bar: title on the left, review stats after it.
pub fn render_header(f: &mut Frame, area: Rect, theme: &Theme, stats: Line<'static>) {
    let mut spans = vec![Span::styled(" Evidence Review ", theme.header_style())];
    spans.push(Span::raw("  "));
    spans.extend(stats.spans);
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Bottom bar: key hints on the left, save status on the right.
pub fn render_footer(f: &mut Frame, area: Rect, app: &App, hints: &[(&str, &str)]) {
    let theme = &app.theme;
    let mut spans = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(":{desc}"), theme.footer_style()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);

    let (status, color) = app.save_status();
    let right = Line::from(Span::styled(
        format!("{status} "),
        Style::default().fg(color),
    ))
    .alignment(Alignment::Right);
    f.render_widget(Paragraph::new(right), area);
}

/// Main review screen: optional record list, the record's fields and flags,
/// and the image panel.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let main_area = if app.sidebar_visible {
        let list_width = (area.width / 4).clamp(20, 36);
        let [list_area, rest] =
            Layout::horizontal([Constraint::Length(list_width), Constraint::Min(40)]).areas(area);
        crate::view::record_list::render(f, list_area, app);
        rest
    } else {
        area
    };

    let Some(record) = app.session.as_ref().and_then(|s| s.current()).cloned() else {
        app.last_image_area = None;
        let empty = Paragraph::new("The CSV has no records.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.dim))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(app.theme.border_style()),
            );
        f.render_widget(empty, main_area);
        return;
    };

    let [details_area, image_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(main_area);

    render_details(f, details_area, &app.theme, &record);
    crate::view::image::render(f, image_area, app);
}

fn render_details(f: &mut Frame, area: Rect, theme: &Theme, record: &Record) {
    let mut lines = Vec::new();
    for &field in FlagField::all() {
        let ok = record.flag(field);
        let (expected_col, found_col) = field.compared_columns();
        let mark = if ok { "[\u{2713}]" } else { "[\u{2717}]" };
        let key = match field {
            FlagField::Name => '1',
            FlagField::Period => '2',
            FlagField::Task => '3',
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{mark} "),
                Style::default()
                    .fg(theme.flag_color(ok))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                field.label().to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({key})"), Style::default().fg(theme.dim)),
        ]));
        lines.push(labelled("  to validate: ", record.get(expected_col), theme));
        lines.push(labelled("  found:       ", record.get(found_col), theme));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Justification",
        Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
    )));
    let justification = record.get(columns::JUSTIFICACION);
    lines.push(Line::from(Span::styled(
        if justification.is_empty() {
            "-".to_string()
        } else {
            justification.to_string()
        },
        Style::default().fg(theme.text),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(" Record "),
    );
    f.render_widget(paragraph, area);
}

fn labelled<'a>(label: &'a str, value: &str, theme: &Theme) -> Line<'a> {
    let value = if value.is_empty() { "-" } else { value };
    Line::from(vec![
        Span::styled(label, Style::default().fg(theme.dim)),
        Span::styled(value.to_string(), Style::default().fg(theme.text)),
    ])
}
