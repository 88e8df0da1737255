use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::models::{ErrorResponse, SaveRequest, SaveResponse};
use crate::state::AppState;

/// Replace the record CSV with the submitted content.
///
/// The payload must be non-empty and parse as CSV. The new file is written
/// next to the old one and renamed over it, so readers see either the old
/// or the new content, never a partial write.
pub async fn save_results(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveRequest>,
) -> impl IntoResponse {
    if req.csv_data.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("csvData is empty")),
        )
            .into_response();
    }

    let rows = match evidence_review_core::parse_records(&req.csv_data) {
        Ok(records) => records.len(),
        Err(e) => {
            tracing::warn!(error = %e, "rejected unparsable CSV");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("invalid CSV: {e}"))),
            )
                .into_response();
        }
    };

    let _guard = state.write_lock.lock().await;
    let path = state.csv_path.clone();
    let written = tokio::task::spawn_blocking(move || replace_file(&path, req.csv_data.as_bytes()))
        .await
        .map_err(std::io::Error::other)
        .and_then(|r| r);

    match written {
        Ok(()) => {
            tracing::info!(path = %state.csv_path.display(), rows, "CSV saved");
            Json(SaveResponse {
                success: true,
                rows,
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(path = %state.csv_path.display(), error = %e, "failed to write CSV");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Write `content` to a temp file in the target's directory, then rename it
/// over `path`.
fn replace_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
