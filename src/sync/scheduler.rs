use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::agent::SyncAgent;
use crate::app::AppEvent;

/// A running periodic sync. Stops when [`SyncHandle::stop`] is called or the
/// handle is dropped.
pub struct SyncHandle {
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Spawn the sync loop.
    ///
    /// The first tick fires immediately, then every `period`. Each fetched
    /// batch is handed to the UI loop as [`AppEvent::SyncFetched`]; merging
    /// happens there so the store has a single owner. A tick that comes due
    /// while the previous fetch is still running is skipped. The loop ends on
    /// its own once the receiver is gone.
    pub fn start(agent: SyncAgent, period: Duration, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let Some(guard) = agent.try_begin() else {
                    tracing::debug!("Previous sync still running, skipping tick");
                    continue;
                };
                let result = agent.fetch_batch().await;
                drop(guard);

                let result = result.map_err(|e| {
                    tracing::warn!(endpoint = %agent.settings().endpoint, error = %e, "Sync fetch failed");
                    e.to_string()
                });

                if event_tx.send(AppEvent::SyncFetched(result)).await.is_err() {
                    tracing::debug!("Event receiver dropped, stopping sync");
                    break;
                }
            }
        });

        tracing::info!(period_secs = period.as_secs(), "Periodic sync started");
        Self { task }
    }

    pub fn stop(&self) {
        if !self.task.is_finished() {
            self.task.abort();
            tracing::info!("Periodic sync stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
