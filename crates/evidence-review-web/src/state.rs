use std::path::PathBuf;

use tokio::sync::Mutex;

/// Shared application state accessible from all handlers.
pub struct AppState {
    /// The record CSV served at `/resultados_validacion.csv`.
    pub csv_path: PathBuf,
    /// Directory served under `/evidencias/`.
    pub evidence_dir: PathBuf,
    /// Held while replacing the CSV so concurrent saves land one at a time.
    pub write_lock: Mutex<()>,
}

impl AppState {
    pub fn new(csv_path: impl Into<PathBuf>, evidence_dir: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            evidence_dir: evidence_dir.into(),
            write_lock: Mutex::new(()),
        }
    }
}
