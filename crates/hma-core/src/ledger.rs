//! # Ledger Engine
//!
//! Client files and their running ledgers.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_client(name, detail, fee)                                       │
//! │      └─► new client, ledger = [today, FEE PROFESSIONAL ..., fee]        │
//! │                                                                         │
//! │  delete_client(id)                                                      │
//! │      └─► removed, selection cleared (always)                            │
//! │                                                                         │
//! │  append_ledger_entry(client_idx, entry)     ┐ stale client index or     │
//! │  delete_ledger_entry(client_idx, position)  ┘ position: silent no-op    │
//! │                                                                         │
//! │  balance_of(client) = Σ entry.amt   (recomputed on every call)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ledger entries have no identity. Positions shift when an earlier entry
//! is deleted, so callers must resolve a position against the latest
//! committed state and never hold one across a suspension point.

use chrono::NaiveDate;

use crate::money::Money;
use crate::registry;
use crate::state::ApplicationState;
use crate::types::{new_id, Client, LedgerEntry};
use crate::validation::{require_amount, require_upper, ValidationResult};
use crate::FEE_DESCRIPTION;

/// Sum of every entry amount. Never cached.
pub fn balance_of(client: &Client) -> Money {
    client.ledger.iter().map(|entry| entry.amt).sum()
}

impl Client {
    /// Each entry paired with the balance after it, in ledger order.
    pub fn running_balances(&self) -> Vec<(&LedgerEntry, Money)> {
        let mut running = Money::zero();
        self.ledger
            .iter()
            .map(|entry| {
                running += entry.amt;
                (entry, running)
            })
            .collect()
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Form input for a new client file.
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub name: String,
    pub detail: String,
    /// Free text; anything that is not a number is treated as 0.
    pub initial_fee: String,
}

impl NewClient {
    /// Validates the form and builds the client with its opening fee entry.
    pub fn into_client(self, today: NaiveDate) -> ValidationResult<Client> {
        let name = require_upper("name", &self.name)?;
        Ok(Client {
            id: new_id(),
            name,
            detail: self.detail.trim().to_string(),
            ledger: vec![LedgerEntry {
                date: today,
                desc: FEE_DESCRIPTION.to_string(),
                amt: Money::parse_or_zero(&self.initial_fee),
            }],
        })
    }
}

/// Form input for a ledger line.
#[derive(Debug, Clone, Default)]
pub struct NewLedgerEntry {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub desc: String,
    /// Signed amount; negative records a payment.
    pub amt: String,
}

impl NewLedgerEntry {
    /// Both `desc` and `amt` are required; `desc` is uppercased.
    pub fn into_entry(self, today: NaiveDate) -> ValidationResult<LedgerEntry> {
        let desc = require_upper("desc", &self.desc)?;
        let amt = require_amount("amt", &self.amt)?;
        Ok(LedgerEntry {
            date: self.date.unwrap_or(today),
            desc,
            amt,
        })
    }
}

// =============================================================================
// State Mutations
// =============================================================================

impl ApplicationState {
    /// Creates a client file and appends it to the registry.
    ///
    /// A missing name fails without touching the state.
    pub fn create_client(&mut self, input: NewClient, today: NaiveDate) -> ValidationResult<Client> {
        let client = input.into_client(today)?;
        self.clients.push(client.clone());
        Ok(client)
    }

    /// Removes the client with `id`. Returns whether one was removed.
    ///
    /// The selection is cleared whether or not the deleted client was the
    /// selected one, and even when no client matched.
    pub fn delete_client(&mut self, id: &str) -> bool {
        self.active_client_selection = None;
        registry::remove_by_id(&mut self.clients, id)
    }

    /// Appends `entry` to the ledger at `client_index`.
    ///
    /// Returns `false` and changes nothing when the index is stale.
    pub fn append_ledger_entry(&mut self, client_index: usize, entry: LedgerEntry) -> bool {
        match self.clients.get_mut(client_index) {
            Some(client) => {
                client.ledger.push(entry);
                true
            }
            None => false,
        }
    }

    /// Removes the entry at `position` from the ledger at `client_index`.
    ///
    /// Returns `false` and changes nothing when either index is stale.
    pub fn delete_ledger_entry(&mut self, client_index: usize, position: usize) -> bool {
        match self.clients.get_mut(client_index) {
            Some(client) if position < client.ledger.len() => {
                client.ledger.remove(position);
                true
            }
            _ => false,
        }
    }

    /// Replaces every client (CSV import). Clears the selection.
    pub fn replace_clients(&mut self, clients: Vec<Client>) {
        self.clients = clients;
        self.active_client_selection = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn new_client(name: &str, fee: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            detail: "Fasakh".to_string(),
            initial_fee: fee.to_string(),
        }
    }

    fn entry(desc: &str, amt: &str) -> LedgerEntry {
        NewLedgerEntry {
            date: None,
            desc: desc.to_string(),
            amt: amt.to_string(),
        }
        .into_entry(today())
        .unwrap()
    }

    #[test]
    fn test_create_client_seeds_fee_entry() {
        let mut state = ApplicationState::empty();
        let client = state.create_client(new_client("ali", "2500"), today()).unwrap();

        assert_eq!(client.name, "ALI");
        assert_eq!(client.ledger.len(), 1);
        assert_eq!(client.ledger[0].date, today());
        assert_eq!(client.ledger[0].desc, FEE_DESCRIPTION);
        assert_eq!(client.balance(), Money::from_ringgit(2500));
        assert_eq!(state.clients(), &[client]);
    }

    #[test]
    fn test_create_client_unparseable_fee_is_zero() {
        let mut state = ApplicationState::empty();
        let client = state.create_client(new_client("ALI", "dua ribu"), today()).unwrap();
        assert_eq!(client.balance(), Money::zero());
    }

    #[test]
    fn test_create_client_requires_name() {
        let mut state = ApplicationState::empty();
        let err = state.create_client(new_client("   ", "100"), today()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "name".to_string()
            }
        );
        assert!(state.clients().is_empty());
    }

    #[test]
    fn test_delete_client_always_clears_selection() {
        let mut state = ApplicationState::empty();
        let a = state.create_client(new_client("A", "1"), today()).unwrap();
        state.create_client(new_client("B", "1"), today()).unwrap();

        state.select_client(1).unwrap();
        assert!(state.delete_client(&a.id));
        assert_eq!(state.active_client_selection(), None);
        assert_eq!(state.clients().len(), 1);

        state.select_client(0).unwrap();
        assert!(!state.delete_client("no-such-id"));
        assert_eq!(state.active_client_selection(), None);
        assert_eq!(state.clients().len(), 1);
    }

    #[test]
    fn test_append_and_delete_entries() {
        let mut state = ApplicationState::empty();
        state.create_client(new_client("ALI", "2500"), today()).unwrap();

        assert!(state.append_ledger_entry(0, entry("bayaran", "-1000")));
        assert!(state.append_ledger_entry(0, entry("kos", "150.50")));
        assert_eq!(state.clients()[0].balance(), Money::from_sen(165050));
        assert_eq!(state.clients()[0].ledger[1].desc, "BAYARAN");

        assert!(state.delete_ledger_entry(0, 0));
        assert_eq!(state.clients()[0].balance(), Money::from_sen(-84950));
    }

    #[test]
    fn test_stale_indexes_are_noops() {
        let mut state = ApplicationState::empty();
        state.create_client(new_client("ALI", "2500"), today()).unwrap();
        let before = state.clone();

        assert!(!state.append_ledger_entry(1, entry("x", "1")));
        assert!(!state.delete_ledger_entry(1, 0));
        assert!(!state.delete_ledger_entry(0, 1));
        assert_eq!(state, before);
    }

    #[test]
    fn test_ledger_can_be_emptied() {
        let mut state = ApplicationState::empty();
        state.create_client(new_client("ALI", "2500"), today()).unwrap();
        assert!(state.delete_ledger_entry(0, 0));
        assert!(state.clients()[0].ledger.is_empty());
        assert_eq!(state.clients()[0].balance(), Money::zero());
    }

    #[test]
    fn test_new_entry_validation() {
        let missing_desc = NewLedgerEntry {
            date: None,
            desc: " ".to_string(),
            amt: "10".to_string(),
        };
        assert!(missing_desc.into_entry(today()).is_err());

        let bad_amount = NewLedgerEntry {
            date: None,
            desc: "KOS".to_string(),
            amt: "sepuluh".to_string(),
        };
        assert!(bad_amount.into_entry(today()).is_err());

        let dated = NewLedgerEntry {
            date: NaiveDate::from_ymd_opt(2024, 12, 31),
            desc: "kos".to_string(),
            amt: "10".to_string(),
        };
        assert_eq!(dated.into_entry(today()).unwrap().date.to_string(), "2024-12-31");
    }

    #[test]
    fn test_running_balances() {
        let mut state = ApplicationState::empty();
        state.create_client(new_client("ALI", "2500"), today()).unwrap();
        state.append_ledger_entry(0, entry("bayaran", "-1000"));
        state.append_ledger_entry(0, entry("bayaran", "-1500"));

        let running: Vec<Money> = state.clients()[0]
            .running_balances()
            .into_iter()
            .map(|(_, balance)| balance)
            .collect();
        assert_eq!(
            running,
            vec![
                Money::from_ringgit(2500),
                Money::from_ringgit(1500),
                Money::zero()
            ]
        );
    }

    #[test]
    fn test_replace_clients_clears_selection() {
        let mut state = ApplicationState::seeded();
        state.select_client(0).unwrap();
        state.replace_clients(Vec::new());
        assert_eq!(state.active_client_selection(), None);
        assert!(state.clients().is_empty());
    }

    #[test]
    fn test_oversized_amounts_never_reach_the_ledger() {
        let huge = "50000000000000000";
        let mut state = ApplicationState::empty();
        state.create_client(new_client("ali", huge), today()).unwrap();
        assert_eq!(state.clients()[0].balance(), Money::zero());

        let err = NewLedgerEntry {
            date: None,
            desc: "yuran".into(),
            amt: huge.into(),
        }
        .into_entry(today())
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_balance_saturates_instead_of_overflowing() {
        let mut state = ApplicationState::empty();
        state.create_client(new_client("ali", "0"), today()).unwrap();
        for _ in 0..2 {
            let big = LedgerEntry {
                date: today(),
                desc: "BIG".into(),
                amt: Money::from_sen(i64::MAX),
            };
            assert!(state.append_ledger_entry(0, big));
        }

        assert_eq!(state.clients()[0].balance(), Money::from_sen(i64::MAX));
        let running = state.clients()[0].running_balances();
        assert_eq!(running.last().unwrap().1, Money::from_sen(i64::MAX));
    }
}
