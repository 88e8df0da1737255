//! HTTP server for the evidence review workflow: serves the record CSV,
//! accepts edited CSV back, and serves the evidence images.

pub mod handlers;
pub mod models;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use state::AppState;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_CSV: &str = "resultados_validacion.csv";
pub const DEFAULT_EVIDENCE_DIR: &str = "data/Evidencias 2024";
pub const DEFAULT_ORIGINS: &[&str] = &["http://localhost:5173", "http://127.0.0.1:5173"];

/// Largest CSV accepted by `/save-results`.
const BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Build the application router. `origins` are the browser origins allowed
/// by CORS; entries that are not valid header values are skipped.
pub fn router(state: Arc<AppState>, origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_LENGTH]);

    Router::new()
        .route(
            "/resultados_validacion.csv",
            get(handlers::csv::serve_csv),
        )
        .route("/save-results", post(handlers::save::save_results))
        .nest_service("/evidencias", ServeDir::new(&state.evidence_dir))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
