//! # hma-db: Persistence Store for the HMA office tool
//!
//! The application state is one JSON document kept in a SQLite key/value
//! table. This crate owns the pool, the embedded migrations and the
//! load/save policy.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HMA Office Data Flow                             │
//! │                                                                         │
//! │  StateWriter task (apps/office)                                         │
//! │       │  store.save(&snapshot)                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     hma-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  StateStore   │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │◄───│  KvRepository │    │  (embedded)  │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: kv_store["hma_sistem_data"] = { "clients": [...], ... } │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hma_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("hma.db")).await?;
//! let store = db.state_store();
//!
//! let state = store.load().await;   // never fails
//! store.save(&state).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::kv::KvRepository;
pub use store::StateStore;
