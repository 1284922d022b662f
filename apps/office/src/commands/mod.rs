//! # Office Commands
//!
//! One module per area of the office. Every command takes the [`Office`]
//! context, goes through [`StateService`] for reads and writes, and returns
//! `ApiResult<T>`.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  client    add, list, delete, open, close                               │
//! │  ledger    show, add entry, delete entry, statement                     │
//! │  pjs       add, list (sorted), delete, monthly totals                   │
//! │  service   add, list, delete                                            │
//! │  invoice   issue receipt                                                │
//! │  transfer  export, read import, apply import                            │
//! │  logo      set, clear, effective                                        │
//! │  view      set, current                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Office`]: crate::context::Office
//! [`StateService`]: crate::state::StateService

pub mod client;
pub mod invoice;
pub mod ledger;
pub mod logo;
pub mod pjs;
pub mod service;
pub mod transfer;
pub mod view;
