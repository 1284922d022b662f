//! # State Service
//!
//! Owns the one [`ApplicationState`] value and serializes every mutation.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  mutate(f)                                                              │
//! │    lock ──► clone current state ──► f(&mut clone)                       │
//! │                                        │                                │
//! │                     ┌──────────────────┴──────────────────┐             │
//! │                     ▼                                     ▼             │
//! │                   Err(e)                                Ok(r)           │
//! │          old snapshot stays                 normalize, version + 1,     │
//! │          (nothing observable)               swap in Arc<new state>,     │
//! │                                             writer.submit(snapshot)     │
//! │    unlock                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers take an `Arc` of the current snapshot and never see a half
//! applied change. The closure runs with the lock held and must not await.

use std::sync::{Arc, Mutex, MutexGuard};

use hma_core::ApplicationState;
use tracing::{debug, info};

use super::writer::StateWriter;

/// A committed state with its version number.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub state: Arc<ApplicationState>,
}

/// Single-writer holder of the application state.
#[derive(Debug)]
pub struct StateService {
    current: Mutex<Snapshot>,
    writer: Option<StateWriter>,
}

impl StateService {
    /// Service over `initial` that persists through `writer`.
    pub fn new(initial: ApplicationState, writer: StateWriter) -> Self {
        Self::build(initial, Some(writer))
    }

    /// Service that keeps state in memory only.
    pub fn detached(initial: ApplicationState) -> Self {
        Self::build(initial, None)
    }

    fn build(mut initial: ApplicationState, writer: Option<StateWriter>) -> Self {
        initial.normalize();
        StateService {
            current: Mutex::new(Snapshot {
                version: 0,
                state: Arc::new(initial),
            }),
            writer,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        // A panic inside a mutation never reaches the swap, so the guarded
        // snapshot is still a committed one.
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The latest committed snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().clone()
    }

    /// The latest committed state.
    pub fn state(&self) -> Arc<ApplicationState> {
        self.lock().state.clone()
    }

    /// Reads from the latest committed state.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ApplicationState) -> R,
    {
        let state = self.state();
        f(&state)
    }

    /// Applies `f` to a copy of the state and commits the copy only if `f`
    /// succeeds.
    pub fn mutate<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut ApplicationState) -> Result<R, E>,
    {
        let mut current = self.lock();

        let mut next = ApplicationState::clone(&current.state);
        let result = f(&mut next)?;
        next.normalize();

        let snapshot = Snapshot {
            version: current.version + 1,
            state: Arc::new(next),
        };
        *current = snapshot.clone();
        drop(current);

        info!(version = snapshot.version, "State committed");
        if let Some(writer) = &self.writer {
            writer.submit(snapshot);
        } else {
            debug!(version = snapshot.version, "No writer attached, state not persisted");
        }

        Ok(result)
    }

    /// Waits for pending saves.
    pub async fn flush(&self) {
        if let Some(writer) = &self.writer {
            writer.flush().await;
        }
    }

    /// Flushes and stops the writer.
    pub async fn shutdown(self) {
        if let Some(writer) = self.writer {
            writer.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hma_core::{ValidationError, View};
    use hma_db::{Database, DbConfig};

    #[test]
    fn test_failed_mutation_changes_nothing() {
        let service = StateService::detached(ApplicationState::seeded());
        let before = service.snapshot();

        let result: Result<(), ValidationError> = service.mutate(|state| {
            state.set_view(View::Invoice);
            state.select_client(10_000)
        });

        assert!(result.is_err());
        let after = service.snapshot();
        assert_eq!(after.version, before.version);
        assert_eq!(after.state.current_view(), View::ClientRegistry);
        assert!(Arc::ptr_eq(&before.state, &after.state));
    }

    #[test]
    fn test_commit_bumps_version() {
        let service = StateService::detached(ApplicationState::empty());
        let held = service.state();

        service
            .mutate(|state| {
                state.set_view(View::Notarization);
                Ok::<_, ValidationError>(())
            })
            .unwrap();

        assert_eq!(service.snapshot().version, 1);
        assert_eq!(service.read(|s| s.current_view()), View::Notarization);
        // Earlier readers keep their snapshot.
        assert_eq!(held.current_view(), View::ClientRegistry);
    }

    #[tokio::test]
    async fn test_writer_persists_latest() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let writer = StateWriter::spawn(db.state_store(), 0);
        let service = StateService::new(ApplicationState::seeded(), writer);

        for view in [View::Notarization, View::Services, View::Invoice] {
            service
                .mutate(|state| {
                    state.set_view(view);
                    Ok::<_, ValidationError>(())
                })
                .unwrap();
        }
        service.flush().await;

        let loaded = db.state_store().load().await;
        assert_eq!(loaded.current_view(), View::Invoice);
        assert_eq!(&loaded, service.state().as_ref());

        service.shutdown().await;
    }
}
