mod backend;
mod update;
mod util;
use util::*;

use std::time::Instant;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use tokio::sync::mpsc;

use evidence_review_core::{
    AutosaveController, FlagField, ImageResolver, ReviewSummary, SaveTicket, SaveTrigger, Session,
};

use crate::model::toast::{ToastKind, ToastState};
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    /// Loading or parsing failed; holds the message shown to the reviewer.
    Failed(String),
    Review,
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub session: Option<Session>,
    pub autosave: AutosaveController,
    pub resolver: ImageResolver,
    pub theme: Theme,
    pub toasts: ToastState,
    /// Where records are loaded from, shown on the loading screen.
    pub source_url: String,
    pub show_help: bool,
    pub confirm_quit: bool,
    pub should_quit: bool,
    pub sidebar_visible: bool,
    /// Highlighted row in the record list sidebar.
    pub list_cursor: usize,
    /// Local time of the last successful save.
    pub last_saved: Option<String>,
    pub tick: usize,
    /// Inner area of the image panel from the last frame, used to decide
    /// whether a mouse press starts a pan.
    pub last_image_area: Option<Rect>,
    /// Channel for sending commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(resolver: ImageResolver, autosave: AutosaveController, theme: Theme) -> Self {
        Self {
            screen: Screen::Loading,
            session: None,
            autosave,
            resolver,
            theme,
            toasts: ToastState::default(),
            source_url: String::new(),
            show_help: false,
            confirm_quit: false,
            should_quit: false,
            sidebar_visible: true,
            list_cursor: 0,
            last_saved: None,
            tick: 0,
            last_image_area: None,
            backend_cmd_tx: None,
        }
    }

    /// Send a command to the backend. Returns false when no listener is
    /// attached or it has shut down.
    fn send(&self, cmd: BackendCommand) -> bool {
        match &self.backend_cmd_tx {
            Some(tx) => tx.send(cmd).is_ok(),
            None => false,
        }
    }

    /// Ask the backend for the record CSV and show the loading screen.
    pub fn start_load(&mut self) {
        self.screen = Screen::Loading;
        if !self.send(BackendCommand::Load) {
            self.screen = Screen::Failed("backend unavailable".to_string());
        }
    }

    /// Ask for a save through the autosave queue, dispatching it at once
    /// when no other save is in flight.
    pub(crate) fn request_save(&mut self, trigger: SaveTrigger) {
        if self.session.is_none() {
            return;
        }
        if let Some(ticket) = self.autosave.request(trigger) {
            self.dispatch_save(ticket);
        }
    }

    /// Fire the debounced save when its deadline has passed.
    pub fn poll_autosave(&mut self, now: Instant) {
        if self.session.is_none() {
            return;
        }
        if let Some(ticket) = self.autosave.poll(now) {
            self.dispatch_save(ticket);
        }
    }

    /// Serialize the records as they are right now and hand them to the
    /// backend under `ticket`.
    pub(crate) fn dispatch_save(&mut self, ticket: SaveTicket) {
        let csv = match self.session.as_ref().map(Session::to_csv) {
            Some(Ok(csv)) => csv,
            Some(Err(e)) => {
                self.abort_save(ticket, format!("could not serialize records: {e}"));
                return;
            }
            None => {
                self.abort_save(ticket, "no records loaded".to_string());
                return;
            }
        };

        tracing::debug!(seq = ticket.seq, trigger = ticket.trigger.label(), "dispatching save");
        let sent = self.send(BackendCommand::Save {
            seq: ticket.seq,
            trigger: ticket.trigger,
            csv,
        });
        if !sent {
            self.abort_save(ticket, "backend unavailable".to_string());
        }
    }

    /// Close out a save that never reached the backend.
    fn abort_save(&mut self, ticket: SaveTicket, message: String) {
        tracing::error!(seq = ticket.seq, error = %message, "save not sent");
        self.toasts
            .push(ToastKind::Error, format!("Save failed: {message}"), Instant::now());
        if let Some(next) = self.autosave.complete(ticket.seq, false).next {
            self.dispatch_save(next);
        }
    }

    /// Ask the backend to verify the current record's image, unless it is
    /// already the placeholder.
    pub(crate) fn probe_current_image(&self) {
        let Some(session) = &self.session else {
            return;
        };
        if let Some(slot) = session.image()
            && !slot.is_placeholder()
        {
            self.send(BackendCommand::ProbeImage {
                index: session.cursor(),
                url: slot.url().to_string(),
            });
        }
    }

    pub fn summary(&self) -> ReviewSummary {
        self.session
            .as_ref()
            .map(Session::summary)
            .unwrap_or_default()
    }

    /// Short save status for the footer.
    pub fn save_status(&self) -> (String, ratatui::style::Color) {
        if self.autosave.is_saving() {
            ("Saving\u{2026}".to_string(), self.theme.pending)
        } else if self.autosave.has_unsent_changes() {
            ("Unsaved changes".to_string(), self.theme.pending)
        } else if let Some(ts) = &self.last_saved {
            (format!("Saved {ts}"), self.theme.ok)
        } else {
            ("Not saved yet".to_string(), self.theme.dim)
        }
    }

    /// Build the stats line shown in the header bar.
    fn build_stats_line(&self) -> Line<'static> {
        let theme = &self.theme;
        let summary = self.summary();
        let position = match &self.session {
            Some(s) if !s.is_empty() => format!("Record {}/{}  ", s.cursor() + 1, s.len()),
            _ => String::new(),
        };

        let mut spans = vec![Span::styled(position, Style::default().fg(theme.text))];
        for &field in FlagField::all() {
            spans.push(Span::styled(
                format!(
                    "{}:{} ({:.0}%)  ",
                    field.label(),
                    summary.count(field),
                    summary.pct(field)
                ),
                Style::default().fg(theme.dim),
            ));
        }
        Line::from(spans)
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        crate::view::review::render_header(f, header_area, &self.theme, self.build_stats_line());

        let screen = self.screen.clone();
        match screen {
            Screen::Loading => {
                self.last_image_area = None;
                crate::view::loading::render(f, body_area, self);
                crate::view::review::render_footer(f, footer_area, self, &[("q", "quit")]);
            }
            Screen::Failed(message) => {
                self.last_image_area = None;
                crate::view::error::render(f, body_area, &self.theme, &message);
                crate::view::review::render_footer(
                    f,
                    footer_area,
                    self,
                    &[("r", "reload"), ("q", "quit")],
                );
            }
            Screen::Review => {
                crate::view::review::render_in(f, self, body_area);
                crate::view::review::render_footer(
                    f,
                    footer_area,
                    self,
                    &[
                        ("a/d", "prev/next"),
                        ("1-3", "toggle"),
                        ("s", "save"),
                        ("+/-", "zoom"),
                        ("?", "help"),
                    ],
                );
            }
        }

        crate::view::toast::render(f, area, &self.toasts, &self.theme);

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme, self.autosave.has_unsent_changes());
        }
    }
}

#[cfg(test)]
mod tests;
