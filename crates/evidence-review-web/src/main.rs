use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use evidence_review_web::{
    AppState, DEFAULT_CSV, DEFAULT_EVIDENCE_DIR, DEFAULT_ORIGINS, DEFAULT_PORT, router,
};

/// Evidence server: serves the review CSV and evidence images, and stores
/// the reviewer's edits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Record CSV to serve and overwrite on save
    #[arg(long, env = "EVIDENCE_CSV", default_value = DEFAULT_CSV)]
    csv: PathBuf,

    /// Directory of evidence images
    #[arg(long, env = "EVIDENCE_DIR", default_value = DEFAULT_EVIDENCE_DIR)]
    evidence_dir: PathBuf,

    /// Allowed CORS origin (repeatable; defaults to the Vite dev server)
    #[arg(long = "allow-origin")]
    allow_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    if !args.evidence_dir.is_dir() {
        tracing::warn!(dir = %args.evidence_dir.display(), "evidence directory does not exist");
    }
    if !args.csv.exists() {
        tracing::warn!(path = %args.csv.display(), "CSV file does not exist yet");
    }

    let origins = if args.allow_origins.is_empty() {
        DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect()
    } else {
        args.allow_origins
    };

    let state = Arc::new(AppState::new(args.csv, args.evidence_dir));
    let app = router(state, &origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!(%addr, "evidence server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
