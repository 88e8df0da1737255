use evidence_review_core::{RecordSet, SaveTrigger};

/// Commands sent from the TUI to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// Fetch and parse the record CSV.
    Load,
    /// Submit the full CSV text. `seq` identifies the autosave ticket.
    Save {
        seq: u64,
        trigger: SaveTrigger,
        csv: String,
    },
    /// Check whether the image for record `index` can be loaded.
    ProbeImage { index: usize, url: String },
}

/// Events flowing from the backend tasks to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    Loaded(RecordSet),
    LoadFailed { error: String },
    SaveFinished {
        seq: u64,
        trigger: SaveTrigger,
        result: Result<(), String>,
    },
    ImageUnavailable { index: usize, url: String },
}
