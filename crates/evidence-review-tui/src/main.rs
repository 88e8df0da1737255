use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use evidence_review_core::client::{
    DEFAULT_BASE_URL, DEFAULT_CSV_PATH, DEFAULT_IMAGES_PATH, DEFAULT_SAVE_PATH, DEFAULT_TIMEOUT,
};
use evidence_review_core::{
    AutosaveController, DEFAULT_DEBOUNCE, Endpoints, ImageResolver, PLACEHOLDER_URL, ReviewClient,
    config_file,
};

mod action;
mod app;
mod backend;
mod input;
mod logging;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;

/// Evidence review: step through extracted evidence records, confirm or
/// reject the name, period and task matches, and save back to the server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evidence server base URL (default: http://localhost:5001)
    #[arg(long)]
    server: Option<String>,

    /// Path of the record CSV on the server
    #[arg(long)]
    csv_path: Option<String>,

    /// Path of the save endpoint on the server
    #[arg(long)]
    save_path: Option<String>,

    /// Path prefix of the evidence images on the server
    #[arg(long)]
    images_path: Option<String>,

    /// URL shown when a record has no usable image
    #[arg(long)]
    placeholder: Option<String>,

    /// Quiet period after the last edit before autosaving, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Start with the record list hidden
    #[arg(long)]
    no_sidebar: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = logging::init();

    // Resolve config from CLI flags > env vars > config file > defaults
    let file_config = config_file::load_config();
    let server_cfg = file_config.server.unwrap_or_default();
    let autosave_cfg = file_config.autosave.unwrap_or_default();
    let display_cfg = file_config.display.unwrap_or_default();

    let base_url = args
        .server
        .or_else(|| std::env::var("EVIDENCE_SERVER").ok())
        .or(server_cfg.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let csv_path = args
        .csv_path
        .or(server_cfg.csv_path)
        .unwrap_or_else(|| DEFAULT_CSV_PATH.to_string());
    let save_path = args
        .save_path
        .or(server_cfg.save_path)
        .unwrap_or_else(|| DEFAULT_SAVE_PATH.to_string());
    let images_path = args
        .images_path
        .or(server_cfg.images_path)
        .unwrap_or_else(|| DEFAULT_IMAGES_PATH.to_string());
    let placeholder = args
        .placeholder
        .or(server_cfg.placeholder_url)
        .unwrap_or_else(|| PLACEHOLDER_URL.to_string());
    let timeout = args
        .timeout_secs
        .or(server_cfg.timeout_secs)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);
    let debounce = args
        .debounce_ms
        .or(autosave_cfg.debounce_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_DEBOUNCE);
    let theme_name = args
        .theme
        .or(display_cfg.theme)
        .unwrap_or_else(|| "hacker".to_string());
    let sidebar = !args.no_sidebar && display_cfg.sidebar.unwrap_or(true);

    let endpoints = Endpoints::from_base(&base_url, &csv_path, &save_path, &images_path);
    tracing::info!(
        csv = %endpoints.csv_url,
        save = %endpoints.save_url,
        images = %endpoints.images_url,
        debounce_ms = debounce.as_millis() as u64,
        "starting evidence review"
    );

    let client = ReviewClient::new(endpoints.clone(), timeout).context("building HTTP client")?;
    let resolver = ImageResolver::new(endpoints.images_url.clone(), placeholder);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(
        resolver,
        AutosaveController::new(debounce),
        theme::Theme::from_name(&theme_name),
    );
    app.source_url = endpoints.csv_url.clone();
    app.sidebar_visible = sidebar;

    // Set up backend command channel
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    app.backend_cmd_tx = Some(cmd_tx);

    tokio::spawn(backend::run_listener(
        client.clone(),
        cmd_rx,
        event_tx,
        cancel.clone(),
    ));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    app.start_load();

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            _ = cancel.cancelled() => {
                app.should_quit = true;
            }
            // Backend events (non-blocking drain)
            Some(backend_event) = event_rx.recv() => {
                app.handle_backend_event(backend_event);
                while let Ok(evt) = event_rx.try_recv() {
                    app.handle_backend_event(evt);
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    app.update(input::map_event(&evt));
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    flush_on_exit(&app, &client).await;

    Ok(())
}

/// Send one last save when edits have not reached the server yet.
async fn flush_on_exit(app: &App, client: &ReviewClient) {
    if !app.autosave.has_unsent_changes() && !app.autosave.is_saving() {
        return;
    }
    let Some(session) = &app.session else {
        return;
    };
    let csv = match session.to_csv() {
        Ok(csv) => csv,
        Err(e) => {
            tracing::error!(error = %e, "could not serialize records on exit");
            eprintln!("Unsaved changes could not be serialized: {e}");
            return;
        }
    };
    match client.save_csv(csv).await {
        Ok(()) => tracing::info!("final save succeeded"),
        Err(e) => {
            tracing::error!(error = %e, "final save failed");
            eprintln!("Final save failed: {e}");
        }
    }
}
