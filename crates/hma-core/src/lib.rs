//! # hma-core: Pure Business Logic for the HMA office tool
//!
//! This crate holds the ledger and financial-state engine for a single
//! legal office: client files with running ledgers, the notarization log,
//! the service price list, CSV import/export and receipt assembly.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HMA Office Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    `hma` CLI (apps/office)                      │   │
//! │  │    client ──► ledger ──► pjs ──► service ──► invoice ──► import │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ StateService::mutate                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ hma-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  ledger  │ │ registry │ │  codec   │ │ invoice  │          │   │
//! │  │   │ balances │ │ pjs/svc  │ │ transfer │ │ receipts │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO CLOCK                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼──────────┐  ┌──────────────────────┐  │
//! │  │   hma-db (state slot in SQLite)        │  │ hma-sync (notify)    │  │
//! │  └────────────────────────────────────────┘  └──────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Client, LedgerEntry, PjsRecord, ServiceItem, View
//! - [`state`] - ApplicationState and its load policy
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ledger`] - Client creation, ledger mutation, balances
//! - [`registry`] - Notarization log and price list, sortable view
//! - [`codec`] - CSV text encode/decode
//! - [`transfer`] - Typed CSV import/export
//! - [`invoice`] - Cart, receipts, statements
//! - [`seed`] - Seed dataset
//! - [`validation`] - Input validation helpers
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: "today" is always passed in by the caller
//! 2. **Integer Money**: All amounts are sen (i64)
//! 3. **Explicit Errors**: Validation failures are typed and change nothing
//! 4. **One State Value**: every mutation is a method on `ApplicationState`
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hma_core::{ApplicationState, Money, NewClient};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let mut state = ApplicationState::empty();
//!
//! let client = state
//!     .create_client(
//!         NewClient {
//!             name: "ali".into(),
//!             detail: "Fasakh".into(),
//!             initial_fee: "2500".into(),
//!         },
//!         today,
//!     )
//!     .unwrap();
//!
//! assert_eq!(client.name, "ALI");
//! assert_eq!(client.balance(), Money::from_ringgit(2500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod invoice;
pub mod ledger;
pub mod money;
pub mod registry;
pub mod seed;
pub mod state;
pub mod transfer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ImportError, ValidationError};
pub use invoice::{Cart, CartLine, Customer, Document, DocumentLine};
pub use ledger::{balance_of, NewClient, NewLedgerEntry};
pub use money::Money;
pub use registry::{monthly_totals, NewPjsRecord, NewServiceItem, PjsSort, PjsSortKey, SortDirection};
pub use state::ApplicationState;
pub use transfer::{PendingImport, TransferKind};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key of the persistence slot holding the whole application state.
pub const STORAGE_KEY: &str = "hma_sistem_data";

/// Firm name printed on documents.
pub const FIRM_NAME: &str = "HAIRI MUSTAFA ASSOCIATES";

/// Logo reference used when no logo has been uploaded.
pub const DEFAULT_LOGO: &str = "https://arleta.site/interactivelink/2510/logo.png";

/// Description of the opening entry of every new client ledger.
pub const FEE_DESCRIPTION: &str = "FEE PROFESSIONAL DIPERSETUJUI";

/// Description of the single entry created for an imported client.
pub const IMPORTED_BALANCE_DESCRIPTION: &str = "IMPORTED BALANCE";
