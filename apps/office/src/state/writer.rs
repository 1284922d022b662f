//! # State Writer
//!
//! Background task persisting committed snapshots.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StateService::mutate ──submit(snap v7)──┐                              │
//! │  StateService::mutate ──submit(snap v8)──┤  watch channel               │
//! │                                          │  (only the newest is kept)   │
//! │                                          ▼                              │
//! │  writer task: borrow_and_update() ──► store.save(v8) ──► saved = 8      │
//! │                                                                         │
//! │  flush(): wait until saved ≥ last submitted version                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed save is logged and counted as done; the next commit writes the
//! whole state again.

use hma_db::StateStore;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::service::Snapshot;

/// Handle to the single persistence task.
#[derive(Debug)]
pub struct StateWriter {
    pending: watch::Sender<Option<Snapshot>>,
    saved: watch::Receiver<u64>,
    worker: JoinHandle<()>,
}

impl StateWriter {
    /// Starts the writer task on the current runtime. `initial_version` is
    /// the version already on disk.
    pub fn spawn(store: StateStore, initial_version: u64) -> Self {
        let (pending, pending_rx) = watch::channel(None);
        let (saved_tx, saved) = watch::channel(initial_version);

        let worker = tokio::spawn(run(store, pending_rx, saved_tx));

        StateWriter {
            pending,
            saved,
            worker,
        }
    }

    /// Hands a snapshot over for saving. Never blocks; an unsaved older
    /// snapshot is replaced.
    pub fn submit(&self, snapshot: Snapshot) {
        debug!(version = snapshot.version, "Snapshot queued for saving");
        self.pending.send_replace(Some(snapshot));
    }

    /// Version of the last snapshot handed to [`submit`](Self::submit).
    fn submitted_version(&self) -> Option<u64> {
        self.pending.borrow().as_ref().map(|s| s.version)
    }

    /// Waits until everything submitted so far has been written (or failed).
    pub async fn flush(&self) {
        let Some(target) = self.submitted_version() else {
            return;
        };
        let mut saved = self.saved.clone();
        if saved.wait_for(|v| *v >= target).await.is_err() {
            error!(version = target, "State writer stopped before flushing");
        }
    }

    /// Writes anything still pending and stops the task.
    pub async fn shutdown(self) {
        let StateWriter {
            pending, worker, ..
        } = self;
        drop(pending);
        if let Err(e) = worker.await {
            error!(error = %e, "State writer task failed");
        }
    }
}

async fn run(
    store: StateStore,
    mut pending: watch::Receiver<Option<Snapshot>>,
    saved: watch::Sender<u64>,
) {
    info!(key = %store.key(), "State writer started");

    while pending.changed().await.is_ok() {
        let Some(snapshot) = pending.borrow_and_update().clone() else {
            continue;
        };

        match store.save(&snapshot.state).await {
            Ok(()) => debug!(version = snapshot.version, "State saved"),
            Err(e) => error!(version = snapshot.version, error = %e, "Failed to save state"),
        }
        saved.send_replace(snapshot.version);
    }

    info!("State writer stopped");
}
