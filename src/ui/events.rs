//! Application event handling.
//!
//! Processes results from background tasks: sync fetches, exports and
//! panics caught in spawned tasks.

use crate::app::{App, AppEvent};

/// Apply one background event to the app state.
pub(super) async fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::SyncFetched(result) => {
            app.apply_sync_batch(result).await;
        }
        AppEvent::ExportComplete { count, path } => {
            tracing::info!(count, path = %path, "Quotes exported");
            app.set_status(format!("Exported {} quotes to {}", count, path));
        }
        AppEvent::ExportFailed { error } => {
            tracing::error!(error = %error, "Export failed");
            app.set_status(format!("Export failed: {}", error));
        }
        AppEvent::TaskPanicked { task, error } => {
            app.set_status(format!("Internal error in {}: {}", task, error));
        }
    }
    app.needs_redraw = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::quotes::{Quote, QuoteBook};
    use crate::storage::Database;
    use std::path::PathBuf;

    async fn test_app() -> App {
        let db = Database::open(":memory:").await.unwrap();
        let book = QuoteBook::load(db).await.unwrap();
        App::new(book, Config::default(), PathBuf::from("/tmp")).unwrap()
    }

    fn status(app: &App) -> &str {
        app.status_message.as_ref().map(|(m, _)| m.as_ref()).unwrap_or("")
    }

    #[tokio::test]
    async fn test_sync_event_merges() {
        let mut app = test_app().await;
        let before = app.book.quotes().len();
        handle_app_event(
            &mut app,
            AppEvent::SyncFetched(Ok(vec![Quote::new("remote", "Server")])),
        )
        .await;
        assert_eq!(app.book.quotes().len(), before + 1);
        assert!(app.categories.iter().any(|c| c == "Server"));
    }

    #[tokio::test]
    async fn test_export_events_set_status() {
        let mut app = test_app().await;
        handle_app_event(
            &mut app,
            AppEvent::ExportComplete {
                count: 4,
                path: "/tmp/quotes.json".into(),
            },
        )
        .await;
        assert_eq!(status(&app), "Exported 4 quotes to /tmp/quotes.json");

        handle_app_event(
            &mut app,
            AppEvent::ExportFailed {
                error: "disk full".into(),
            },
        )
        .await;
        assert_eq!(status(&app), "Export failed: disk full");
    }

    #[tokio::test]
    async fn test_panic_event_surfaces() {
        let mut app = test_app().await;
        handle_app_event(
            &mut app,
            AppEvent::TaskPanicked {
                task: "sync",
                error: "boom".into(),
            },
        )
        .await;
        assert!(status(&app).contains("sync"));
    }
}
