use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use evidence_review_core::ReviewClient;

use crate::tui_event::{BackendCommand, BackendEvent};

/// Receive commands from the UI loop and run each one on its own task so
/// that a slow request never holds up the next command. Ordering between
/// saves is enforced on the UI side (one in flight at a time).
pub async fn run_listener(
    client: ReviewClient,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(event) = execute(&client, cmd).await {
                // Receiver gone means the UI already exited.
                let _ = tx.send(event);
            }
        });
    }
}

/// Run one command to completion and describe the outcome.
pub async fn execute(client: &ReviewClient, cmd: BackendCommand) -> Option<BackendEvent> {
    match cmd {
        BackendCommand::Load => Some(match client.load_records().await {
            Ok(records) => BackendEvent::Loaded(records),
            Err(e) => {
                tracing::error!(error = %e, "failed to load records");
                BackendEvent::LoadFailed {
                    error: e.to_string(),
                }
            }
        }),
        BackendCommand::Save { seq, trigger, csv } => {
            tracing::debug!(seq, trigger = trigger.label(), bytes = csv.len(), "sending save");
            let result = client.save_csv(csv).await.map_err(|e| {
                tracing::error!(seq, error = %e, "save failed");
                e.to_string()
            });
            Some(BackendEvent::SaveFinished {
                seq,
                trigger,
                result,
            })
        }
        BackendCommand::ProbeImage { index, url } => match client.probe_image(&url).await {
            Ok(()) => None,
            Err(e) => {
                tracing::info!(index, url = %url, error = %e, "evidence image unavailable");
                Some(BackendEvent::ImageUnavailable { index, url })
            }
        },
    }
}
