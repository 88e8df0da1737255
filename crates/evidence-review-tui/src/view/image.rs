use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Rectangle};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::truncate;
use crate::app::App;

/// Half-extent of the canvas coordinate space on each axis.
const EXTENT: f64 = 50.0;
/// Evidence pages are portrait; frame them at 3:4 like the placeholder.
const FRAME_W: f64 = 45.0;
const FRAME_H: f64 = 60.0;

/// Image panel. Terminals cannot show the evidence photo itself, so the
/// panel draws the photo's frame under the current zoom and pan, with the
/// URL beneath it for copying.
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let Some(session) = &app.session else {
        app.last_image_area = None;
        return;
    };
    let Some(slot) = session.image() else {
        app.last_image_area = None;
        return;
    };
    let viewport = session.viewport();

    let title = format!(" Evidence  {}% ", viewport.zoom_percent());
    let border_color = if viewport.is_dragging() {
        theme.active
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [canvas_area, caption_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).areas(inner);

    // Pan offsets are in terminal cells; map them onto canvas units.
    let cell_w = (2.0 * EXTENT) / f64::from(canvas_area.width.max(1));
    let cell_h = (2.0 * EXTENT) / f64::from(canvas_area.height.max(1));
    let (ox, oy) = viewport.offset();
    let zoom = f64::from(viewport.zoom());
    let width = FRAME_W * zoom;
    let height = FRAME_H * zoom;
    let cx = f64::from(ox) * cell_w;
    let cy = -f64::from(oy) * cell_h;

    let frame_color = if slot.is_placeholder() {
        theme.dim
    } else {
        theme.ok
    };
    let label = if slot.is_placeholder() {
        "Image not available"
    } else {
        "evidence"
    };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-EXTENT, EXTENT])
        .y_bounds([-EXTENT, EXTENT])
        .paint(move |ctx| {
            ctx.draw(&Rectangle {
                x: cx - width / 2.0,
                y: cy - height / 2.0,
                width,
                height,
                color: frame_color,
            });
            ctx.print(
                cx - label.len() as f64 * cell_w / 2.0,
                cy,
                Span::styled(label, Style::default().fg(frame_color)),
            );
        });
    f.render_widget(canvas, canvas_area);

    let url_width = caption_area.width as usize;
    let caption = vec![
        Line::from(Span::styled(
            truncate(slot.url(), url_width),
            Style::default().fg(theme.dim),
        )),
        Line::from(vec![
            Span::styled(
                if viewport.can_pan() {
                    "drag to pan"
                } else {
                    "zoom in to pan"
                },
                Style::default().fg(theme.dim),
            ),
            Span::styled(
                "  y: copy URL",
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    f.render_widget(Paragraph::new(caption), caption_area);

    app.last_image_area = Some(canvas_area);
}
