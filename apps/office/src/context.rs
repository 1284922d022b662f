//! # Office Context
//!
//! Everything a command needs, built once at startup.
//!
//! ## Startup / Shutdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Office::open(config)                                                   │
//! │    1. create the database directory                                     │
//! │    2. Database::new (WAL, migrations)                                   │
//! │    3. StateStore::load  (never fails, seed fallback)                    │
//! │    4. StateWriter::spawn + StateService::new                            │
//! │    5. Notifier::spawn   (disabled handle when not configured)           │
//! │                                                                         │
//! │  Office::close()                                                        │
//! │    1. flush + stop the writer                                           │
//! │    2. drain + stop the notifier                                         │
//! │    3. close the pool                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate, Utc};
use hma_db::{Database, DbConfig};
use hma_sync::{Notifier, NotifierHandle, OfficeConfig};
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::state::{StateService, StateWriter};

pub struct Office {
    config: OfficeConfig,
    db: Database,
    state: StateService,
    notifier: NotifierHandle,
    today: Option<NaiveDate>,
}

impl Office {
    /// Opens the database named in `config` and loads the state.
    pub async fn open(config: OfficeConfig) -> ApiResult<Self> {
        let path = config.storage.database_path.clone();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        info!(path = %path.display(), "Opening office database");
        let db = Database::new(DbConfig::new(path)).await?;
        Ok(Self::with_database(config, db).await)
    }

    /// Builds the context over an already opened database.
    pub async fn with_database(config: OfficeConfig, db: Database) -> Self {
        let store = db.state_store();
        let initial = store.load().await;

        let writer = StateWriter::spawn(store, 0);
        let state = StateService::new(initial, writer);
        let notifier = Notifier::spawn(&config.notify);

        Office {
            config,
            db,
            state,
            notifier,
            today: None,
        }
    }

    /// Pins "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn config(&self) -> &OfficeConfig {
        &self.config
    }

    pub fn state(&self) -> &StateService {
        &self.state
    }

    pub fn notifier(&self) -> &NotifierHandle {
        &self.notifier
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Persists pending state, delivers queued notifications, and closes
    /// the database.
    pub async fn close(self) {
        let Office {
            db,
            state,
            notifier,
            ..
        } = self;

        state.shutdown().await;
        if let Err(e) = notifier.shutdown().await {
            warn!(error = %e, "Notifier did not shut down cleanly");
        }
        db.close().await;
    }
}
