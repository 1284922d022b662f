//! Ledger commands for one client file.
//!
//! Every command takes an optional client index; without one the open
//! ledger (the active selection) is used. The index is resolved inside the
//! mutation, against the state being changed.

use hma_core::validation::validate_index;
use hma_core::{ApplicationState, BalanceStanding, Document, Money, NewLedgerEntry};
use serde::Serialize;
use tracing::debug;

use crate::context::Office;
use crate::error::{ApiError, ApiResult};

/// One ledger line with the balance after it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    pub position: usize,
    pub date: chrono::NaiveDate,
    pub desc: String,
    pub amt: Money,
    pub running: Money,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerView {
    pub index: usize,
    pub client_id: String,
    pub name: String,
    pub detail: String,
    pub rows: Vec<LedgerRow>,
    pub balance: Money,
    pub standing: BalanceStanding,
}

/// Picks the explicit index, or the open ledger.
pub(crate) fn resolve_client(state: &ApplicationState, index: Option<usize>) -> ApiResult<usize> {
    match index.or(state.active_client_selection()) {
        Some(index) => {
            validate_index("client", index, state.clients().len())?;
            Ok(index)
        }
        None => Err(ApiError::validation(
            "No client ledger is open; pass --client or run `client open`",
        )),
    }
}

fn ledger_view(state: &ApplicationState, index: usize) -> LedgerView {
    let client = &state.clients()[index];
    let rows = client
        .running_balances()
        .into_iter()
        .enumerate()
        .map(|(position, (entry, running))| LedgerRow {
            position,
            date: entry.date,
            desc: entry.desc.clone(),
            amt: entry.amt,
            running,
        })
        .collect();

    LedgerView {
        index,
        client_id: client.id.clone(),
        name: client.name.clone(),
        detail: client.detail.clone(),
        rows,
        balance: client.balance(),
        standing: client.standing(),
    }
}

pub fn show_ledger(office: &Office, client: Option<usize>) -> ApiResult<LedgerView> {
    debug!(?client, "show_ledger command");
    office.state().read(|state| {
        let index = resolve_client(state, client)?;
        Ok(ledger_view(state, index))
    })
}

/// Appends an entry and returns the updated ledger.
pub fn add_entry(
    office: &Office,
    client: Option<usize>,
    input: NewLedgerEntry,
) -> ApiResult<LedgerView> {
    debug!(?client, desc = %input.desc, "add_entry command");
    let entry = input.into_entry(office.today())?;

    office.state().mutate(|state| {
        let index = resolve_client(state, client)?;
        state.append_ledger_entry(index, entry);
        Ok(ledger_view(state, index))
    })
}

/// Removes the entry at `position` and returns the updated ledger.
pub fn delete_entry(
    office: &Office,
    client: Option<usize>,
    position: usize,
) -> ApiResult<LedgerView> {
    debug!(?client, position, "delete_entry command");

    office.state().mutate(|state| {
        let index = resolve_client(state, client)?;
        validate_index("position", position, state.clients()[index].ledger.len())?;
        state.delete_ledger_entry(index, position);
        Ok(ledger_view(state, index))
    })
}

/// Statement of account for a client ledger.
pub fn statement(office: &Office, client: Option<usize>) -> ApiResult<Document> {
    debug!(?client, "statement command");
    let today = office.today();
    let millis = office.now_millis();

    office.state().read(|state| {
        let index = resolve_client(state, client)?;
        Ok(Document::statement(&state.clients()[index], today, millis))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hma_core::NewClient;

    #[test]
    fn test_resolve_prefers_explicit_index() {
        let mut state = ApplicationState::seeded();
        state.select_client(0).unwrap();
        assert_eq!(resolve_client(&state, Some(1)).unwrap(), 1);
        assert_eq!(resolve_client(&state, None).unwrap(), 0);
    }

    #[test]
    fn test_resolve_without_selection_fails() {
        let mut state = ApplicationState::empty();
        let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        state
            .create_client(
                NewClient {
                    name: "siti".into(),
                    ..Default::default()
                },
                today,
            )
            .unwrap();

        assert!(resolve_client(&state, None).is_err());
        assert!(resolve_client(&state, Some(5)).is_err());
    }

    #[test]
    fn test_ledger_view_running_totals() {
        let state = ApplicationState::seeded();
        let view = ledger_view(&state, 0);
        let last = view.rows.last().unwrap();
        assert_eq!(last.running, view.balance);
        assert_eq!(view.rows.len(), state.clients()[0].ledger.len());
    }
}
