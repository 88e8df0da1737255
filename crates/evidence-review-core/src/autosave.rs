//! Save scheduling for the review session.
//!
//! Three triggers can ask for a save: an explicit request from the reviewer,
//! a request issued right before navigating, and a debounce deadline armed by
//! each edit (every new edit pushes the deadline out again).
//!
//! Requests go through a single slot: at most one save is in flight, and any
//! triggers that arrive meanwhile collapse into one pending save that is
//! issued when the in-flight one completes. Because the caller serializes the
//! records when it receives a [`SaveTicket`], the follow-up save always
//! carries the newest state. Each ticket has a monotonic sequence number and a
//! completion older than the last applied one is reported as stale.
//!
//! Edits stay marked unsent until a save carrying them succeeds; a failed
//! save leaves them marked so the next trigger (or the exit flush) retries.
//!
//! The controller is a plain state machine driven with explicit `Instant`s so
//! that timing can be tested without a runtime.

use std::time::{Duration, Instant};

/// Quiet period after the last edit before an automatic save.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Why a save was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    Manual,
    Navigation,
    Debounced,
}

impl SaveTrigger {
    pub fn label(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Navigation => "navigation",
            Self::Debounced => "autosave",
        }
    }
}

/// Permission to send one save request. The caller must report the outcome
/// through [`AutosaveController::complete`] with the same `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    pub seq: u64,
    pub trigger: SaveTrigger,
}

/// Result of reporting a finished save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// False when the completion is older than one already applied; its
    /// outcome should not be surfaced.
    pub applied: bool,
    /// Follow-up save to send now, if triggers piled up while in flight.
    pub next: Option<SaveTicket>,
}

#[derive(Debug)]
pub struct AutosaveController {
    debounce: Duration,
    deadline: Option<Instant>,
    next_seq: u64,
    in_flight: Option<SaveTicket>,
    pending: Option<SaveTrigger>,
    last_applied: u64,
    /// Edits not yet confirmed by a successful save.
    dirty: bool,
}

impl Default for AutosaveController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl AutosaveController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            deadline: None,
            next_seq: 1,
            in_flight: None,
            pending: None,
            last_applied: 0,
            dirty: false,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Arm (or re-arm) the debounce deadline after an edit.
    pub fn note_edit(&mut self, now: Instant) {
        self.dirty = true;
        self.deadline = Some(now + self.debounce);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<SaveTicket> {
        self.in_flight
    }

    /// Whether some edit has not been confirmed saved, or a save is still
    /// waiting on the debounce timer or the pending slot.
    pub fn has_unsent_changes(&self) -> bool {
        self.dirty || self.deadline.is_some() || self.pending.is_some()
    }

    /// Ask for a save now. Returns a ticket if the request may go out
    /// immediately; otherwise it is parked in the pending slot. Any armed
    /// debounce deadline is dropped because this save covers it.
    pub fn request(&mut self, trigger: SaveTrigger) -> Option<SaveTicket> {
        self.deadline = None;
        if self.in_flight.is_some() {
            self.pending = Some(trigger);
            return None;
        }
        Some(self.issue(trigger))
    }

    /// Fire the debounced save if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<SaveTicket> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.request(SaveTrigger::Debounced),
            _ => None,
        }
    }

    /// Report that the save with sequence `seq` finished. `ok` is false when
    /// the save failed or never reached the server.
    pub fn complete(&mut self, seq: u64, ok: bool) -> Completion {
        let applied = seq > self.last_applied;
        if applied {
            self.last_applied = seq;
            // Edits made after this ticket was issued re-armed the deadline,
            // so they are still reported unsent.
            self.dirty = !ok;
        }

        let mut next = None;
        if self.in_flight.is_some_and(|t| t.seq == seq) {
            self.in_flight = None;
            if let Some(trigger) = self.pending.take() {
                next = Some(self.issue(trigger));
            }
        }

        Completion { applied, next }
    }

    /// Forget all scheduling state, e.g. when records are reloaded.
    /// Completions for tickets issued before the reset are reported stale.
    pub fn reset(&mut self) {
        self.deadline = None;
        self.pending = None;
        self.in_flight = None;
        self.dirty = false;
        self.last_applied = self.next_seq - 1;
    }

    fn issue(&mut self, trigger: SaveTrigger) -> SaveTicket {
        let ticket = SaveTicket {
            seq: self.next_seq,
            trigger,
        };
        self.next_seq += 1;
        self.in_flight = Some(ticket);
        ticket
    }
}
