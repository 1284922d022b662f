//! # Repository Module
//!
//! Database repository implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StateStore                                                             │
//! │       │  kv.put("hma_sistem_data", json)                                │
//! │       ▼                                                                 │
//! │  KvRepository                                                           │
//! │  ├── get(&self, key)                                                    │
//! │  ├── put(&self, key, value)                                             │
//! │  ├── delete(&self, key)                                                 │
//! │  └── keys(&self)                                                        │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  kv_store table                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KvRepository`](kv::KvRepository) - named text slots

pub mod kv;
