use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "EVIDENCE_LOG";

/// Directory for log files: `~/.cache/evidence-review/logs/` on Linux.
pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("evidence-review").join("logs"))
}

/// Route `tracing` output to a daily log file, since the terminal belongs to
/// the UI. Returns the writer guard, which must live until exit so buffered
/// lines get flushed. Any failure leaves logging disabled.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::daily(&dir, "evidence-review.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .ok()?;

    Some(guard)
}
