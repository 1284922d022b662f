//! # CSV Import / Export
//!
//! Typed boundary on top of [`crate::codec`].
//!
//! ## Import Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  file text ──► codec::decode ──► Vec<Row>                               │
//! │                                    │                                    │
//! │                                    ▼  prepare(kind, text, today)        │
//! │              ┌─────────────────────────────────────────┐                │
//! │              │ no expected column in header → reject    │                │
//! │              │ zero rows                    → reject    │                │
//! │              │ bad date cell                → reject    │                │
//! │              │ otherwise coerce every row, fresh ids    │                │
//! │              └────────────────────┬────────────────────┘                │
//! │                                   ▼                                     │
//! │                            PendingImport  ── operator confirms ──►      │
//! │                                   │                                     │
//! │                                   ▼  ApplicationState::apply_import     │
//! │                     collection replaced wholesale (never merged)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codec::{self, Row};
use crate::error::{CoreResult, ImportError};
use crate::money::Money;
use crate::state::ApplicationState;
use crate::types::{new_id, Client, LedgerEntry, PjsRecord, ServiceItem};
use crate::validation::{optional_upper, DATE_FORMAT};
use crate::IMPORTED_BALANCE_DESCRIPTION;

/// Name used when an imported row has no name.
pub const UNNAMED: &str = "UNNAMED";

// =============================================================================
// Transfer Kind
// =============================================================================

/// The three CSV flavors, distinguished by header set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    Clients,
    Notarization,
    Services,
}

impl TransferKind {
    /// Export header row.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            TransferKind::Clients => &["Name", "Detail", "Balance"],
            TransferKind::Notarization => &["Date", "Name", "Detail", "Amount"],
            TransferKind::Services => &["Name", "Price"],
        }
    }

    /// Lowercased column names read on import.
    pub fn columns(&self) -> Vec<String> {
        self.headers().iter().map(|h| h.to_lowercase()).collect()
    }

    /// Default export file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            TransferKind::Clients => "HMA_Guaman.csv",
            TransferKind::Notarization => "HMA_PJS.csv",
            TransferKind::Services => "HMA_Services.csv",
        }
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransferKind::Clients => "clients",
            TransferKind::Notarization => "pjs",
            TransferKind::Services => "services",
        })
    }
}

impl FromStr for TransferKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clients" | "guaman" => Ok(TransferKind::Clients),
            "pjs" | "notarization" => Ok(TransferKind::Notarization),
            "services" | "inventory" => Ok(TransferKind::Services),
            other => Err(format!(
                "unknown collection '{}', expected clients, pjs or services",
                other
            )),
        }
    }
}

// =============================================================================
// Export
// =============================================================================

fn cells<const N: usize>(pairs: [(&str, String); N]) -> Row {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Builds the export rows for `kind` from the current state.
pub fn export_rows(kind: TransferKind, state: &ApplicationState) -> Vec<Row> {
    match kind {
        TransferKind::Clients => state
            .clients()
            .iter()
            .map(|c| {
                cells([
                    ("name", c.name.clone()),
                    ("detail", c.detail.clone()),
                    ("balance", c.balance().to_decimal_string()),
                ])
            })
            .collect(),
        TransferKind::Notarization => state
            .pjs_records()
            .iter()
            .map(|r| {
                cells([
                    ("date", r.date.format(DATE_FORMAT).to_string()),
                    ("name", r.name.clone()),
                    ("detail", r.detail.clone()),
                    ("amount", r.amount.to_decimal_string()),
                ])
            })
            .collect(),
        TransferKind::Services => state
            .inventory()
            .iter()
            .map(|s| {
                cells([
                    ("name", s.name.clone()),
                    ("price", s.price.to_decimal_string()),
                ])
            })
            .collect(),
    }
}

/// Encodes the collection for `kind` as CSV text.
pub fn export(kind: TransferKind, state: &ApplicationState) -> CoreResult<String> {
    codec::encode(kind.headers(), &export_rows(kind, state))
}

// =============================================================================
// Import
// =============================================================================

/// Typed records ready to replace a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedRecords {
    Clients(Vec<Client>),
    Notarization(Vec<PjsRecord>),
    Services(Vec<ServiceItem>),
}

/// A decoded, coerced import waiting for the operator to confirm.
///
/// Holding one changes nothing; only [`ApplicationState::apply_import`]
/// does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImport {
    records: ImportedRecords,
}

impl PendingImport {
    pub fn kind(&self) -> TransferKind {
        match self.records {
            ImportedRecords::Clients(_) => TransferKind::Clients,
            ImportedRecords::Notarization(_) => TransferKind::Notarization,
            ImportedRecords::Services(_) => TransferKind::Services,
        }
    }

    /// Number of records that would replace the collection.
    pub fn len(&self) -> usize {
        match &self.records {
            ImportedRecords::Clients(v) => v.len(),
            ImportedRecords::Notarization(v) => v.len(),
            ImportedRecords::Services(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> &ImportedRecords {
        &self.records
    }
}

fn cell<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).map(|v| v.trim()).unwrap_or("")
}

fn name_or_unnamed(raw: &str) -> String {
    let name = optional_upper(raw);
    if name.is_empty() {
        UNNAMED.to_string()
    } else {
        name
    }
}

/// Decodes and coerces `text` as a `kind` import.
///
/// Everything is checked before anything is returned, so a rejected file
/// never partially applies.
pub fn prepare(kind: TransferKind, text: &str, today: NaiveDate) -> Result<PendingImport, ImportError> {
    let rows = codec::decode(text);
    let expected = kind.columns();

    if let Some(first) = rows.first() {
        if !expected.iter().any(|column| first.contains_key(column)) {
            return Err(ImportError::MissingColumns { expected });
        }
    } else {
        return Err(ImportError::Empty);
    }

    let records = match kind {
        TransferKind::Clients => ImportedRecords::Clients(
            rows.iter()
                .map(|row| Client {
                    id: new_id(),
                    name: name_or_unnamed(cell(row, "name")),
                    detail: cell(row, "detail").to_string(),
                    ledger: vec![LedgerEntry {
                        date: today,
                        desc: IMPORTED_BALANCE_DESCRIPTION.to_string(),
                        amt: Money::parse_or_zero(cell(row, "balance")),
                    }],
                })
                .collect(),
        ),
        TransferKind::Notarization => ImportedRecords::Notarization(
            rows.iter()
                .enumerate()
                .map(|(i, row)| {
                    let raw_date = cell(row, "date");
                    let date = if raw_date.is_empty() {
                        today
                    } else {
                        NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
                            ImportError::InvalidValue {
                                // Header is line 1.
                                row: i + 2,
                                column: "date".to_string(),
                                value: raw_date.to_string(),
                            }
                        })?
                    };
                    Ok(PjsRecord {
                        id: new_id(),
                        date,
                        name: name_or_unnamed(cell(row, "name")),
                        detail: optional_upper(cell(row, "detail")),
                        amount: Money::parse_or_zero(cell(row, "amount")),
                    })
                })
                .collect::<Result<Vec<_>, ImportError>>()?,
        ),
        TransferKind::Services => ImportedRecords::Services(
            rows.iter()
                .map(|row| ServiceItem {
                    id: new_id(),
                    name: name_or_unnamed(cell(row, "name")),
                    price: Money::parse_or_zero(cell(row, "price")),
                })
                .collect(),
        ),
    };

    Ok(PendingImport { records })
}

impl ApplicationState {
    /// Replaces the target collection with a confirmed import.
    ///
    /// Client imports also clear the selection.
    pub fn apply_import(&mut self, pending: PendingImport) -> TransferKind {
        let kind = pending.kind();
        match pending.records {
            ImportedRecords::Clients(clients) => self.replace_clients(clients),
            ImportedRecords::Notarization(records) => self.replace_pjs_records(records),
            ImportedRecords::Services(items) => self.replace_services(items),
        }
        kind
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("clients".parse::<TransferKind>().unwrap(), TransferKind::Clients);
        assert_eq!("PJS".parse::<TransferKind>().unwrap(), TransferKind::Notarization);
        assert_eq!("inventory".parse::<TransferKind>().unwrap(), TransferKind::Services);
        assert!("ledger".parse::<TransferKind>().is_err());
    }

    #[test]
    fn test_export_clients_uses_balance() {
        let state = ApplicationState::seeded();
        let text = export(TransferKind::Clients, &state).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("\u{FEFF}Name,Detail,Balance"));
        assert_eq!(lines.next(), Some("\"AMIRA\",\"N.Anak\",\"2500.00\""));
        assert_eq!(text.lines().count(), state.clients().len() + 1);
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(TransferKind::Clients.file_name(), "HMA_Guaman.csv");
        assert_eq!(TransferKind::Notarization.file_name(), "HMA_PJS.csv");
        assert_eq!(TransferKind::Services.file_name(), "HMA_Services.csv");
    }

    #[test]
    fn test_import_clients() {
        let text = "name,detail,balance\n\"ali bin abu\",\"Fasakh\",\"1500.50\"\n,,abc";
        let pending = prepare(TransferKind::Clients, text, today()).unwrap();
        assert_eq!(pending.kind(), TransferKind::Clients);
        assert_eq!(pending.len(), 2);

        let ImportedRecords::Clients(clients) = pending.records() else {
            panic!("expected clients");
        };
        assert_eq!(clients[0].name, "ALI BIN ABU");
        assert_eq!(clients[0].detail, "Fasakh");
        assert_eq!(clients[0].ledger.len(), 1);
        assert_eq!(clients[0].ledger[0].desc, IMPORTED_BALANCE_DESCRIPTION);
        assert_eq!(clients[0].ledger[0].date, today());
        assert_eq!(clients[0].balance(), Money::from_sen(150050));
        assert_eq!(clients[1].name, UNNAMED);
        assert_eq!(clients[1].balance(), Money::zero());
    }

    #[test]
    fn test_import_pjs_defaults_and_rejects_bad_dates() {
        let text = "date,name,detail,amount\n,ahmad,afidavit,90\n2025-10-19,siti,,x";
        let pending = prepare(TransferKind::Notarization, text, today()).unwrap();
        let ImportedRecords::Notarization(records) = pending.records() else {
            panic!("expected records");
        };
        assert_eq!(records[0].date, today());
        assert_eq!(records[0].name, "AHMAD");
        assert_eq!(records[0].detail, "AFIDAVIT");
        assert_eq!(records[0].amount, Money::from_ringgit(90));
        assert_eq!(records[1].amount, Money::zero());

        let bad = "date,name,amount\n2025-10-19,A,1\n19/10/2025,B,2";
        assert_eq!(
            prepare(TransferKind::Notarization, bad, today()).unwrap_err(),
            ImportError::InvalidValue {
                row: 3,
                column: "date".to_string(),
                value: "19/10/2025".to_string(),
            }
        );
    }

    #[test]
    fn test_import_services() {
        let text = "\u{FEFF}Name,Price\n\"afidavit\",\"90.00\"\n\"akuan\",\"\"";
        let pending = prepare(TransferKind::Services, text, today()).unwrap();
        let ImportedRecords::Services(items) = pending.records() else {
            panic!("expected services");
        };
        assert_eq!(items[0].name, "AFIDAVIT");
        assert_eq!(items[0].price, Money::from_ringgit(90));
        assert_eq!(items[1].price, Money::zero());
    }

    #[test]
    fn test_import_rejections() {
        assert_eq!(
            prepare(TransferKind::Services, "name,price", today()).unwrap_err(),
            ImportError::Empty
        );
        assert_eq!(
            prepare(TransferKind::Services, "", today()).unwrap_err(),
            ImportError::Empty
        );
        assert!(matches!(
            prepare(TransferKind::Services, "foo,bar\n1,2", today()).unwrap_err(),
            ImportError::MissingColumns { .. }
        ));
    }

    #[test]
    fn test_apply_replaces_and_clears_selection() {
        let mut state = ApplicationState::seeded();
        state.select_client(3).unwrap();

        let pending = prepare(TransferKind::Clients, "name\nBARU", today()).unwrap();
        assert_eq!(state.apply_import(pending), TransferKind::Clients);

        assert_eq!(state.clients().len(), 1);
        assert_eq!(state.clients()[0].name, "BARU");
        assert_eq!(state.active_client_selection(), None);
    }

    #[test]
    fn test_export_import_preserves_values() {
        let mut state = ApplicationState::empty();
        state.replace_pjs_records(vec![PjsRecord {
            id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
            name: "LEE, \"JOHN\"".to_string(),
            detail: "AKUAN, BERKANUN".to_string(),
            amount: Money::from_sen(1050),
        }]);

        let text = export(TransferKind::Notarization, &state).unwrap();
        let pending = prepare(TransferKind::Notarization, &text, today()).unwrap();
        let ImportedRecords::Notarization(records) = pending.records() else {
            panic!("expected records");
        };
        let original = &state.pjs_records()[0];
        assert_eq!(records[0].date, original.date);
        assert_eq!(records[0].name, original.name);
        assert_eq!(records[0].detail, original.detail);
        assert_eq!(records[0].amount, original.amount);
        assert_ne!(records[0].id, original.id);
    }
}
