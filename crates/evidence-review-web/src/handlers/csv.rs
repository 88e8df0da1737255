use std::io::ErrorKind;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::state::AppState;

pub async fn serve_csv(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match tokio::fs::read_to_string(&state.csv_path).await {
        Ok(content) => {
            tracing::info!(path = %state.csv_path.display(), bytes = content.len(), "serving CSV");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
                content,
            )
                .into_response()
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::error!(path = %state.csv_path.display(), "CSV file not found");
            (StatusCode::NOT_FOUND, "CSV file not found").into_response()
        }
        Err(e) => {
            tracing::error!(path = %state.csv_path.display(), error = %e, "failed to read CSV");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
