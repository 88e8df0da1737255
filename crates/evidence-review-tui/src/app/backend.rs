use std::time::Instant;

use evidence_review_core::Session;

use super::{App, Screen};
use crate::model::toast::ToastKind;
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        let now = Instant::now();
        match event {
            BackendEvent::Loaded(records) => {
                let count = records.len();
                tracing::info!(rows = count, "records loaded");
                self.autosave.reset();
                self.session = Some(Session::new(records, self.resolver.clone()));
                self.list_cursor = 0;
                self.screen = Screen::Review;
                self.toasts
                    .push(ToastKind::Info, format!("Loaded {count} records"), now);
                self.probe_current_image();
            }
            BackendEvent::LoadFailed { error } => {
                self.session = None;
                self.autosave.reset();
                self.screen = Screen::Failed(error);
            }
            BackendEvent::SaveFinished {
                seq,
                trigger,
                result,
            } => {
                let done = self.autosave.complete(seq, result.is_ok());
                if done.applied {
                    match result {
                        Ok(()) => {
                            tracing::info!(seq, trigger = trigger.label(), "save succeeded");
                            self.last_saved = Some(chrono::Local::now().format("%H:%M:%S").to_string());
                            self.toasts.push(ToastKind::Success, "Saved", now);
                        }
                        Err(e) => {
                            tracing::warn!(seq, trigger = trigger.label(), error = %e, "save failed");
                            self.toasts
                                .push(ToastKind::Error, format!("Save failed: {e}"), now);
                        }
                    }
                } else {
                    tracing::debug!(seq, "ignoring stale save completion");
                }
                if let Some(next) = done.next {
                    self.dispatch_save(next);
                }
            }
            BackendEvent::ImageUnavailable { index, url } => {
                if let Some(session) = &mut self.session
                    && session.image_failed(index, &url)
                {
                    tracing::info!(index, url = %url, "showing placeholder image");
                }
            }
        }
    }
}
