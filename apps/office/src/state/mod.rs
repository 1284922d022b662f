//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │      StateService        │ submit │        StateWriter           │  │
//! │  │  Mutex<Snapshot {        │ ─────► │  tokio task, latest wins     │  │
//! │  │    version,              │        │  StateStore::save            │  │
//! │  │    Arc<ApplicationState> │        └──────────────────────────────┘  │
//! │  │  }>                      │                                           │
//! │  └──────────────────────────┘                                           │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • mutations hold the lock for clone + apply + swap only                │
//! │  • readers clone the Arc and release the lock immediately               │
//! │  • only the writer task touches the database                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod service;
mod writer;

pub use service::{Snapshot, StateService};
pub use writer::StateWriter;
