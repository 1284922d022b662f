//! # Application State
//!
//! The single owned value that every operation reads and replaces.
//!
//! ## Load Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  persisted JSON ──► StoredState (every field optional)                  │
//! │                          │                                              │
//! │                          ▼  From<StoredState>                           │
//! │   clients       missing/empty ──► seed clients                          │
//! │   pjsRecords    missing/empty ──► seed records                          │
//! │   inventory     missing       ──► []                                    │
//! │   invoiceCounter missing/< 1  ──► 1                                     │
//! │   firmLogo      missing/""    ──► none                                  │
//! │   currentView   missing/unknown ► guaman                                │
//! │   activeClientSelection outside [0, len(clients)) ──► none              │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                  ApplicationState                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deserializing an `ApplicationState` always goes through this policy. The
//! caller decides what to do with JSON that does not parse at all (the
//! store falls back to [`ApplicationState::seeded`]).

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::seed;
use crate::types::{Client, PjsRecord, ServiceItem, View};
use crate::validation::{validate_index, ValidationResult};

// =============================================================================
// Application State
// =============================================================================

/// The whole persisted application state.
///
/// Fields are only reachable through accessors so the selection invariant
/// (`active_client_selection < clients.len()`) cannot be broken from outside
/// this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredState")]
pub struct ApplicationState {
    pub(crate) clients: Vec<Client>,
    pub(crate) pjs_records: Vec<PjsRecord>,
    pub(crate) inventory: Vec<ServiceItem>,
    pub(crate) invoice_counter: u32,
    pub(crate) firm_logo: Option<String>,
    pub(crate) current_view: View,
    pub(crate) active_client_selection: Option<usize>,
}

impl ApplicationState {
    /// The documented default: seed clients and records, no services,
    /// counter 1, no logo, client view, nothing selected.
    pub fn seeded() -> Self {
        ApplicationState {
            clients: seed::clients(),
            pjs_records: seed::pjs_records(),
            ..ApplicationState::empty()
        }
    }

    /// A state with no data at all. Never produced by loading; used when
    /// building state up from scratch.
    pub fn empty() -> Self {
        ApplicationState {
            clients: Vec::new(),
            pjs_records: Vec::new(),
            inventory: Vec::new(),
            invoice_counter: 1,
            firm_logo: None,
            current_view: View::default(),
            active_client_selection: None,
        }
    }

    /// Restores state from persisted JSON, applying the field-wise defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the full state for the persistence slot.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn pjs_records(&self) -> &[PjsRecord] {
        &self.pjs_records
    }

    pub fn inventory(&self) -> &[ServiceItem] {
        &self.inventory
    }

    pub fn invoice_counter(&self) -> u32 {
        self.invoice_counter
    }

    pub fn firm_logo(&self) -> Option<&str> {
        self.firm_logo.as_deref()
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn active_client_selection(&self) -> Option<usize> {
        self.active_client_selection
    }

    /// The client whose ledger is open, if any.
    pub fn active_client(&self) -> Option<&Client> {
        self.active_client_selection
            .and_then(|idx| self.clients.get(idx))
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Opens a client's ledger.
    pub fn select_client(&mut self, index: usize) -> ValidationResult<()> {
        validate_index("client", index, self.clients.len())?;
        self.active_client_selection = Some(index);
        Ok(())
    }

    /// Closes the open ledger.
    pub fn close_ledger(&mut self) {
        self.active_client_selection = None;
    }

    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Replaces the firm logo. An empty data URL clears it.
    pub fn set_logo(&mut self, logo: Option<String>) {
        self.firm_logo = logo.filter(|l| !l.is_empty());
    }

    /// Re-establishes the state invariants after external construction.
    pub fn normalize(&mut self) {
        if self
            .active_client_selection
            .is_some_and(|idx| idx >= self.clients.len())
        {
            self.active_client_selection = None;
        }
        self.invoice_counter = self.invoice_counter.max(1);
    }
}

impl Default for ApplicationState {
    fn default() -> Self {
        ApplicationState::seeded()
    }
}

// =============================================================================
// Persisted Shape
// =============================================================================

/// Persisted state as read from storage, before defaults are applied.
///
/// Accepts the key names of earlier releases (`invCounter`, `currentPage`,
/// `activeClientIdx`) as well as the current ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default)]
    clients: Option<Vec<Client>>,

    #[serde(default)]
    pjs_records: Option<Vec<PjsRecord>>,

    #[serde(default)]
    inventory: Option<Vec<ServiceItem>>,

    #[serde(default, alias = "invCounter")]
    invoice_counter: Option<i64>,

    #[serde(default)]
    firm_logo: Option<String>,

    #[serde(default, alias = "currentPage")]
    current_view: Option<String>,

    #[serde(default, alias = "activeClientIdx")]
    active_client_selection: Option<i64>,
}

impl From<StoredState> for ApplicationState {
    fn from(stored: StoredState) -> Self {
        let clients = stored
            .clients
            .filter(|c| !c.is_empty())
            .unwrap_or_else(seed::clients);

        let pjs_records = stored
            .pjs_records
            .filter(|r| !r.is_empty())
            .unwrap_or_else(seed::pjs_records);

        let invoice_counter = stored
            .invoice_counter
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n >= 1)
            .unwrap_or(1);

        let current_view = stored
            .current_view
            .as_deref()
            .and_then(View::from_key)
            .unwrap_or_default();

        let active_client_selection = stored
            .active_client_selection
            .and_then(|idx| usize::try_from(idx).ok())
            .filter(|idx| *idx < clients.len());

        ApplicationState {
            clients,
            pjs_records,
            inventory: stored.inventory.unwrap_or_default(),
            invoice_counter,
            firm_logo: stored.firm_logo.filter(|l| !l.is_empty()),
            current_view,
            active_client_selection,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "ALI",
            "detail": "Fasakh",
            "ledger": [{"date": "2025-03-01", "desc": "FEE PROFESSIONAL DIPERSETUJUI", "amt": 2500}]
        })
    }

    #[test]
    fn test_seeded_default() {
        let state = ApplicationState::seeded();
        assert!(!state.clients().is_empty());
        assert!(!state.pjs_records().is_empty());
        assert!(state.inventory().is_empty());
        assert_eq!(state.invoice_counter(), 1);
        assert_eq!(state.firm_logo(), None);
        assert_eq!(state.current_view(), View::ClientRegistry);
        assert_eq!(state.active_client_selection(), None);
    }

    #[test]
    fn test_empty_object_resolves_to_seed() {
        let state = ApplicationState::from_json("{}").unwrap();
        assert_eq!(state, ApplicationState::seeded());
    }

    #[test]
    fn test_fields_default_independently() {
        let json = json!({
            "clients": [client_json("x1")],
            "pjsRecords": [],
            "invoiceCounter": 7,
            "currentView": "inventory"
        });
        let state = ApplicationState::from_json(&json.to_string()).unwrap();

        assert_eq!(state.clients().len(), 1);
        assert_eq!(state.clients()[0].id, "x1");
        assert_eq!(state.pjs_records(), seed::pjs_records().as_slice());
        assert!(state.inventory().is_empty());
        assert_eq!(state.invoice_counter(), 7);
        assert_eq!(state.current_view(), View::Services);
    }

    #[test]
    fn test_legacy_keys_are_accepted() {
        let json = json!({
            "clients": [client_json("a"), client_json("b")],
            "invCounter": 12,
            "currentPage": "pjs",
            "activeClientIdx": 1,
            "firmLogo": "data:image/png;base64,AAAA"
        });
        let state = ApplicationState::from_json(&json.to_string()).unwrap();

        assert_eq!(state.invoice_counter(), 12);
        assert_eq!(state.current_view(), View::Notarization);
        assert_eq!(state.active_client_selection(), Some(1));
        assert_eq!(state.firm_logo(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_out_of_range_selection_is_dropped() {
        for idx in [json!(2), json!(-1), json!(99)] {
            let json = json!({
                "clients": [client_json("a"), client_json("b")],
                "activeClientSelection": idx
            });
            let state = ApplicationState::from_json(&json.to_string()).unwrap();
            assert_eq!(state.active_client_selection(), None);
        }
    }

    #[test]
    fn test_selection_checked_against_resolved_clients() {
        // Empty clients resolve to the seed list, so index 3 becomes valid.
        let json = json!({ "clients": [], "activeClientIdx": 3 });
        let state = ApplicationState::from_json(&json.to_string()).unwrap();
        assert_eq!(state.active_client_selection(), Some(3));
    }

    #[test]
    fn test_invalid_counter_and_view_fall_back() {
        let json = json!({ "invoiceCounter": 0, "currentView": "reports", "firmLogo": "" });
        let state = ApplicationState::from_json(&json.to_string()).unwrap();
        assert_eq!(state.invoice_counter(), 1);
        assert_eq!(state.current_view(), View::ClientRegistry);
        assert_eq!(state.firm_logo(), None);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ApplicationState::from_json("{not json").is_err());
        assert!(ApplicationState::from_json("42").is_err());
        assert!(ApplicationState::from_json(r#"{"clients": "none"}"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut state = ApplicationState::seeded();
        state.select_client(2).unwrap();
        state.set_view(View::Invoice);
        state.set_logo(Some("data:image/png;base64,AAAA".to_string()));

        let json = state.to_json().unwrap();
        let back = ApplicationState::from_json(&json).unwrap();
        assert_eq!(back, state);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["currentView"], "invoice");
        assert_eq!(value["activeClientSelection"], 2);
        assert_eq!(value["invoiceCounter"], 1);
    }

    #[test]
    fn test_select_and_close() {
        let mut state = ApplicationState::seeded();
        let len = state.clients().len();

        assert!(state.select_client(len).is_err());
        assert_eq!(state.active_client_selection(), None);

        state.select_client(0).unwrap();
        assert_eq!(state.active_client().map(|c| c.id.as_str()), Some("c1"));

        state.close_ledger();
        assert_eq!(state.active_client(), None);
    }

    #[test]
    fn test_normalize() {
        let mut state = ApplicationState::empty();
        state.active_client_selection = Some(0);
        state.invoice_counter = 0;
        state.normalize();
        assert_eq!(state.active_client_selection(), None);
        assert_eq!(state.invoice_counter(), 1);
    }
}
