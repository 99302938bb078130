//! Background task helpers for the UI layer.
//!
//! Every spawned task reports back through `AppEvent` and is wrapped in
//! [`catch_task_panic`] so a panic surfaces as a status message instead of a
//! silently vanished task.

use crate::app::{App, AppEvent};
use crate::quotes::{export_to_file, Quote};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// # Returns
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else if let Some(e) = panic.downcast_ref::<Box<dyn std::error::Error + Send>>() {
                e.to_string()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

async fn report_panic(tx: &mpsc::Sender<AppEvent>, task: &'static str, error: String) {
    tracing::error!(task, error = %error, "Background task panicked");
    let _ = tx.send(AppEvent::TaskPanicked { task, error }).await;
}

/// Write the export file off the UI loop.
///
/// The JSON is rendered up front from the current store so the task owns
/// a consistent snapshot.
pub(super) fn spawn_export(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let json = match app.book.export_json() {
        Ok(json) => json,
        Err(e) => {
            app.set_status(format!("Export failed: {:#}", e));
            return;
        }
    };
    let count = app.book.quotes().len();
    let path = app.export_path();
    let tx = event_tx.clone();
    app.set_status("Exporting quotes...");

    tokio::spawn(async move {
        let outcome = catch_task_panic(async {
            let write_path = path.clone();
            let result = tokio::task::spawn_blocking(move || export_to_file(&json, &write_path))
                .await
                .map_err(|e| e.to_string())
                .and_then(|r| r.map_err(|e| format!("{:#}", e)));

            let event = match result {
                Ok(()) => AppEvent::ExportComplete {
                    count,
                    path: path.display().to_string(),
                },
                Err(error) => AppEvent::ExportFailed { error },
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, event = "Export", "Channel send failed (receiver dropped)");
            }
        })
        .await;

        if let Err(panic_msg) = outcome {
            report_panic(&tx, "export", panic_msg).await;
        }
    });
}

/// Fire-and-forget POST of a freshly added quote.
pub(super) fn spawn_push(app: &App, quote: Quote, event_tx: &mpsc::Sender<AppEvent>) {
    if !app.config.push_new_quotes {
        return;
    }
    let agent = app.sync.clone();
    let tx = event_tx.clone();

    tokio::spawn(async move {
        if let Err(panic_msg) = catch_task_panic(agent.push_quote(&quote)).await {
            report_panic(&tx, "push", panic_msg).await;
        }
    });
}

/// Run one fetch now, outside the timer. Skipped if a fetch is in flight.
pub(super) fn spawn_sync_now(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(guard) = app.sync.try_begin() else {
        app.set_status("Sync already in progress");
        return;
    };
    let agent = app.sync.clone();
    let tx = event_tx.clone();
    app.set_status("Syncing...");

    if let Some(previous) = app.sync_task.take() {
        previous.abort();
    }
    app.sync_task = Some(tokio::spawn(async move {
        let outcome = catch_task_panic(async {
            let result = agent.fetch_batch().await;
            drop(guard);
            let result = result.map_err(|e| {
                tracing::warn!(error = %e, "Manual sync failed");
                e.to_string()
            });
            if let Err(e) = tx.send(AppEvent::SyncFetched(result)).await {
                tracing::warn!(error = %e, event = "SyncFetched", "Channel send failed (receiver dropped)");
            }
        })
        .await;

        if let Err(panic_msg) = outcome {
            report_panic(&tx, "sync", panic_msg).await;
        }
    }));
}
