//! # hma-office
//!
//! Command-line front end of the HMA office tool: client ledgers, the
//! notarization log, the service price list, receipts and CSV transfer.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  argv ──► cli::Cli (clap) ──► cli::dispatch                             │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                           commands::<area>                              │
//! │                                   │                                     │
//! │              ┌────────────────────┼────────────────────┐                │
//! │              ▼                    ▼                    ▼                │
//! │        StateService          NotifierHandle        render / JSON        │
//! │     (commit + persist)      (fire and forget)      (stdout)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod render;
pub mod state;

pub use context::Office;
pub use error::{ApiError, ApiResult, ErrorCode};
