use std::time::Instant;

use ratatui::layout::Position;

use evidence_review_core::{FlagField, SaveTrigger};

use super::{App, Screen, osc52_copy};
use crate::action::Action;
use crate::model::toast::ToastKind;

/// Where a navigation request wants to go.
#[derive(Debug, Clone, Copy)]
enum Nav {
    Prev,
    Next,
    To(usize),
}

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        if action == Action::ForceQuit {
            self.should_quit = true;
            return true;
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                Action::Tick => self.on_tick(Instant::now()),
                _ => {}
            }
            return false;
        }

        // Help overlay: any key closes it
        if self.show_help {
            match action {
                Action::Tick => self.on_tick(Instant::now()),
                Action::Quit => self.confirm_quit = true,
                Action::None
                | Action::DragStart(..)
                | Action::DragMove(..)
                | Action::DragEnd => {}
                _ => self.show_help = false,
            }
            return false;
        }

        match action {
            Action::Quit => self.confirm_quit = true,
            Action::ToggleHelp => self.show_help = true,
            Action::Tick => self.on_tick(Instant::now()),
            Action::Reload => {
                if matches!(self.screen, Screen::Failed(_)) {
                    tracing::info!("reloading records");
                    self.start_load();
                }
            }
            _ if self.screen == Screen::Review => self.update_review(action),
            _ => {}
        }
        false
    }

    fn update_review(&mut self, action: Action) {
        match action {
            Action::PrevRecord => self.navigate(Nav::Prev),
            Action::NextRecord => self.navigate(Nav::Next),
            Action::ToggleFlag(field) => self.toggle_flag(field, Instant::now()),
            Action::Save => self.request_save(SaveTrigger::Manual),
            Action::ZoomIn => {
                if let Some(s) = &mut self.session {
                    s.viewport_mut().zoom_in();
                }
            }
            Action::ZoomOut => {
                if let Some(s) = &mut self.session {
                    s.viewport_mut().zoom_out();
                }
            }
            Action::ResetZoom => {
                if let Some(s) = &mut self.session {
                    s.viewport_mut().reset();
                }
            }
            Action::DragStart(x, y) => {
                if let Some(area) = self.last_image_area
                    && area.contains(Position::new(x, y))
                    && let Some(s) = &mut self.session
                {
                    s.viewport_mut().begin_drag(i32::from(x), i32::from(y));
                }
            }
            Action::DragMove(x, y) => {
                if let Some(s) = &mut self.session {
                    s.viewport_mut().drag_to(i32::from(x), i32::from(y));
                }
            }
            Action::DragEnd => {
                if let Some(s) = &mut self.session {
                    s.viewport_mut().end_drag();
                }
            }
            Action::ToggleSidebar => {
                self.sidebar_visible = !self.sidebar_visible;
                if let Some(s) = &self.session {
                    self.list_cursor = s.cursor();
                }
            }
            Action::ListUp => {
                if self.sidebar_visible {
                    self.list_cursor = self.list_cursor.saturating_sub(1);
                }
            }
            Action::ListDown => {
                if self.sidebar_visible
                    && let Some(s) = &self.session
                    && self.list_cursor + 1 < s.len()
                {
                    self.list_cursor += 1;
                }
            }
            Action::ListSelect => {
                if self.sidebar_visible {
                    self.navigate(Nav::To(self.list_cursor));
                }
            }
            Action::CopyImageUrl => {
                let url = self
                    .session
                    .as_ref()
                    .and_then(|s| s.image())
                    .map(|slot| slot.url().to_string());
                if let Some(url) = url {
                    osc52_copy(&url);
                    self.toasts
                        .push(ToastKind::Info, "Image URL copied", Instant::now());
                }
            }
            _ => {}
        }
    }

    /// Save first, then move. The save is requested even when the cursor
    /// cannot move so a boundary press still flushes pending edits.
    fn navigate(&mut self, nav: Nav) {
        if self.session.is_none() {
            return;
        }
        self.request_save(SaveTrigger::Navigation);

        let Some(session) = &mut self.session else {
            return;
        };
        let moved = match nav {
            Nav::Prev => session.go_prev(),
            Nav::Next => session.go_next(),
            Nav::To(index) => session.select(index),
        };
        self.list_cursor = session.cursor();
        if moved {
            tracing::debug!(cursor = session.cursor(), "moved to record");
            self.probe_current_image();
        }
    }

    fn toggle_flag(&mut self, field: FlagField, now: Instant) {
        let Some(session) = &mut self.session else {
            return;
        };
        if let Some(value) = session.toggle(field) {
            tracing::debug!(
                cursor = session.cursor(),
                column = field.column(),
                value,
                "flag toggled"
            );
            self.autosave.note_edit(now);
        }
    }

    fn on_tick(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        self.toasts.expire(now);
        self.poll_autosave(now);
    }
}
