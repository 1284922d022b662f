//! # State Store
//!
//! The whole [`ApplicationState`] lives as one JSON document in a single
//! `kv_store` slot keyed [`STORAGE_KEY`].
//!
//! ## Load Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()                                                                 │
//! │    │                                                                    │
//! │    ├── read error          ──► warn!, seed state                        │
//! │    ├── no row              ──► seed state                               │
//! │    ├── malformed JSON      ──► warn!, seed state                        │
//! │    └── valid JSON          ──► field-wise defaults, selection clamped   │
//! │                                                                         │
//! │  save(&state)  ──► one upsert of the full document                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `load()` never fails. `save()` reports failures; the caller decides
//! whether to surface them.

use hma_core::{ApplicationState, STORAGE_KEY};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::repository::kv::KvRepository;

/// Reads and writes the application state slot.
#[derive(Debug, Clone)]
pub struct StateStore {
    kv: KvRepository,
    key: String,
}

impl StateStore {
    /// Creates a store over the default slot.
    pub fn new(kv: KvRepository) -> Self {
        StateStore {
            kv,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Slot key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the application state, falling back to the seed dataset.
    pub async fn load(&self) -> ApplicationState {
        let raw = match self.kv.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(key = %self.key, "No stored state, starting from seed data");
                return ApplicationState::seeded();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored state, using seed data");
                return ApplicationState::seeded();
            }
        };

        match ApplicationState::from_json(&raw) {
            Ok(state) => {
                debug!(
                    clients = state.clients().len(),
                    pjs_records = state.pjs_records().len(),
                    services = state.inventory().len(),
                    "Loaded stored state"
                );
                state
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored state is malformed, using seed data");
                ApplicationState::seeded()
            }
        }
    }

    /// Returns whether the slot holds anything at all.
    pub async fn exists(&self) -> DbResult<bool> {
        Ok(self.kv.get(&self.key).await?.is_some())
    }

    /// Writes the full state to the slot.
    pub async fn save(&self, state: &ApplicationState) -> DbResult<()> {
        let json = state.to_json()?;
        self.kv.put(&self.key, &json).await
    }

    /// Overwrites the slot with the seed dataset and returns it.
    pub async fn reset(&self) -> DbResult<ApplicationState> {
        let state = ApplicationState::seeded();
        self.save(&state).await?;
        info!(key = %self.key, "State reset to seed data");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use hma_core::ApplicationState;

    #[tokio::test]
    async fn test_empty_slot_loads_seed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.state_store();

        assert!(!store.exists().await.unwrap());
        assert_eq!(store.load().await, ApplicationState::seeded());
    }

    #[tokio::test]
    async fn test_malformed_slot_loads_seed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().put(hma_core::STORAGE_KEY, "{not json").await.unwrap();

        assert_eq!(db.state_store().load().await, ApplicationState::seeded());
    }

    #[tokio::test]
    async fn test_reset_writes_seed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.state_store();
        db.kv().put(hma_core::STORAGE_KEY, r#"{"clients":[]}"#).await.unwrap();

        let state = store.reset().await.unwrap();
        assert!(store.exists().await.unwrap());
        assert_eq!(state, ApplicationState::seeded());
        assert_eq!(store.load().await, state);
    }
}
