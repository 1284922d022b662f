//! # hma-sync: Outbound Notification for the HMA office tool
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   apps/office                                                           │
//! │       │ OfficeConfig::load_or_default(..)                               │
//! │       │ Notifier::spawn(&config.notify) ──► NotifierHandle              │
//! │       ▼                                                                 │
//! │   ┌──────────────────┐     try_send     ┌───────────────────────────┐  │
//! │   │  NotifierHandle  │ ───────────────► │  Notifier (tokio task)    │  │
//! │   └──────────────────┘                  │  reqwest POST, no retry   │  │
//! │                                         └─────────────┬─────────────┘  │
//! │                                                       ▼                 │
//! │                                          external logging endpoint      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Delivery is best effort. Nothing here ever changes application state, and
//! no failure reaches the caller of [`NotifierHandle::notify`].
//!
//! ## Modules
//!
//! - [`config`] - Office configuration (TOML + env)
//! - [`notify`] - Notification payloads and the delivery worker
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod notify;

pub use config::{FirmConfig, NotifyConfig, OfficeConfig, StorageConfig};
pub use error::{SyncError, SyncResult};
pub use notify::{Notification, Notifier, NotifierHandle};
