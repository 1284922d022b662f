//! # Domain Types
//!
//! Core domain types used throughout the office tool.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │   PjsRecord     │   │  ServiceItem    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name, detail   │   │  date, name     │   │  name           │       │
//! │  │  ledger ──┐     │   │  detail, amount │   │  price          │       │
//! │  └───────────┼─────┘   └─────────────────┘   └─────────────────┘       │
//! │              ▼                                                          │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  LedgerEntry    │   │      View       │                             │
//! │  │  date, desc     │   │  guaman | pjs   │                             │
//! │  │  amt (signed)   │   │  inventory ...  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Clients, records and services carry a UUID v4 `id`. Ledger entries have
//! no identity and are addressed by position within their client's ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger;
use crate::money::Money;

/// Generates a fresh record id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// One dated, signed line in a client's ledger.
///
/// Positive `amt` is a charge owed by the client, negative is a payment or
/// credit received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,

    /// Free text, stored uppercase.
    pub desc: String,

    pub amt: Money,
}

// =============================================================================
// Client
// =============================================================================

/// A client file with its running ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier (UUID v4, or `c1`.. for the seed data).
    pub id: String,

    /// Client name, stored uppercase.
    pub name: String,

    /// Case detail (e.g. "Fasakh", "N.Anak").
    #[serde(default)]
    pub detail: String,

    /// Entries in insertion order.
    #[serde(default)]
    pub ledger: Vec<LedgerEntry>,
}

impl Client {
    /// Current balance, folded fresh from the ledger on every call.
    #[inline]
    pub fn balance(&self) -> Money {
        ledger::balance_of(self)
    }

    /// Whether the client still owes money.
    pub fn standing(&self) -> BalanceStanding {
        BalanceStanding::of(self.balance())
    }
}

/// Display flag for a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStanding {
    /// Balance > 0.
    Outstanding,
    /// Balance <= 0 (settled or in credit).
    Settled,
}

impl BalanceStanding {
    pub fn of(balance: Money) -> Self {
        if balance.is_positive() {
            BalanceStanding::Outstanding
        } else {
            BalanceStanding::Settled
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BalanceStanding::Outstanding => "OUTSTANDING",
            BalanceStanding::Settled => "SETTLED",
        }
    }
}

// =============================================================================
// Notarization Record
// =============================================================================

/// A notarization (PJS) transaction. Unrelated to client ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjsRecord {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub detail: String,
    pub amount: Money,
}

// =============================================================================
// Service Item
// =============================================================================

/// A price-list entry. Receipts copy its values, never its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    pub price: Money,
}

// =============================================================================
// View
// =============================================================================

/// Which screen the operator last had open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum View {
    /// Client files and ledgers.
    #[default]
    #[serde(rename = "guaman")]
    ClientRegistry,
    /// Notarization log.
    #[serde(rename = "pjs")]
    Notarization,
    /// Service price list.
    #[serde(rename = "inventory")]
    Services,
    #[serde(rename = "invoice")]
    Invoice,
}

impl View {
    pub const ALL: [View; 4] = [
        View::ClientRegistry,
        View::Notarization,
        View::Services,
        View::Invoice,
    ];

    /// Persisted key for this view.
    pub fn key(&self) -> &'static str {
        match self {
            View::ClientRegistry => "guaman",
            View::Notarization => "pjs",
            View::Services => "inventory",
            View::Invoice => "invoice",
        }
    }

    /// Looks a view up by its persisted key.
    pub fn from_key(key: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amt: i64) -> LedgerEntry {
        LedgerEntry {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            desc: "FEE".to_string(),
            amt: Money::from_ringgit(amt),
        }
    }

    #[test]
    fn test_standing_flags() {
        assert_eq!(
            BalanceStanding::of(Money::from_sen(1)),
            BalanceStanding::Outstanding
        );
        assert_eq!(BalanceStanding::of(Money::zero()), BalanceStanding::Settled);
        assert_eq!(
            BalanceStanding::of(Money::from_sen(-1)),
            BalanceStanding::Settled
        );
    }

    #[test]
    fn test_client_json_shape() {
        let client = Client {
            id: "c1".to_string(),
            name: "AMIRA".to_string(),
            detail: "N.Anak".to_string(),
            ledger: vec![entry(2500)],
        };
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "c1",
                "name": "AMIRA",
                "detail": "N.Anak",
                "ledger": [{"date": "2025-01-01", "desc": "FEE", "amt": 2500}]
            })
        );
        assert_eq!(client.standing(), BalanceStanding::Outstanding);
    }

    #[test]
    fn test_view_keys() {
        for view in View::ALL {
            assert_eq!(View::from_key(view.key()), Some(view));
            let json = serde_json::to_string(&view).unwrap();
            assert_eq!(json, format!("\"{}\"", view.key()));
        }
        assert_eq!(View::from_key("dashboard"), None);
        assert_eq!(View::default(), View::ClientRegistry);
    }

    #[test]
    fn test_new_id_is_unique() {
        assert_ne!(new_id(), new_id());
    }
}
