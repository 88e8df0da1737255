use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::centered_rect;
use crate::theme::Theme;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup = centered_rect(60, 31, area);

    let lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.header_bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section_header("Review", theme),
        key_line("a / \u{2190}", "Previous record (saves first)", theme),
        key_line("d / \u{2192}", "Next record (saves first)", theme),
        key_line("1", "Toggle name check", theme),
        key_line("2", "Toggle period check", theme),
        key_line("3", "Toggle task check", theme),
        key_line("s", "Save now", theme),
        Line::from(""),
        section_header("Image", theme),
        key_line("+ / =", "Zoom in", theme),
        key_line("-", "Zoom out", theme),
        key_line("0", "Reset zoom and pan", theme),
        key_line("Mouse drag", "Pan (when zoomed in)", theme),
        key_line("y", "Copy image URL (OSC 52)", theme),
        Line::from(""),
        section_header("Record list", theme),
        key_line("Tab", "Show / hide the list", theme),
        key_line("j / k", "Move highlight", theme),
        key_line("Enter", "Jump to highlighted record", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("r", "Reload (after a load error)", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<16}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}
