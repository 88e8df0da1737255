use thiserror::Error;

pub mod autosave;
pub mod client;
pub mod codec;
pub mod config_file;
pub mod image;
pub mod record;
pub mod session;
pub mod summary;
pub mod viewport;

// Re-export for convenience
pub use autosave::{AutosaveController, Completion, DEFAULT_DEBOUNCE, SaveTicket, SaveTrigger};
pub use client::{Endpoints, ReviewClient};
pub use codec::{parse_records, to_csv};
pub use image::{ImageResolver, ImageSlot, PLACEHOLDER_URL};
pub use record::{FlagField, Record, RecordSet, columns};
pub use session::Session;
pub use summary::ReviewSummary;
pub use viewport::Viewport;

/// The CSV body could not be parsed (or re-serialized) as records.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected at most {expected} fields, found {found}")]
    ExtraFields {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("CSV writer produced invalid UTF-8")]
    Encoding,
}

/// Fetching the record CSV failed. Fatal to the review session.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("error parsing CSV: {0}")]
    Parse(#[from] ParseError),
}

/// Submitting the CSV to the save endpoint failed. Non-fatal.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("save rejected with status {0}")]
    Status(u16),
    #[error("could not serialize records: {0}")]
    Serialize(#[from] ParseError),
}

/// The evidence image for a record is not reachable.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image unavailable (status {0})")]
    Status(u16),
}
