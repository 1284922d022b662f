//! # Client Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  client add ALI --fee 2500                                              │
//! │       │  create_client (name required, fee defaults to 0)               │
//! │       ├──► commit                                                       │
//! │       └──► notify GUAMAN {name, detail, balance}                        │
//! │                                                                         │
//! │  client delete <ID>   → selection reset to none                         │
//! │  client open <INDEX>  → ledger view for that client                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use hma_core::{ApplicationState, BalanceStanding, Client, Money, NewClient, View};
use hma_sync::Notification;
use serde::Serialize;
use tracing::debug;

use crate::context::Office;
use crate::error::{ApiError, ApiResult};

/// One row of the client registry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub detail: String,
    pub entries: usize,
    pub balance: Money,
    pub standing: BalanceStanding,
    pub selected: bool,
}

impl ClientSummary {
    fn of(state: &ApplicationState, index: usize, client: &Client) -> Self {
        let balance = client.balance();
        ClientSummary {
            index,
            id: client.id.clone(),
            name: client.name.clone(),
            detail: client.detail.clone(),
            entries: client.ledger.len(),
            balance,
            standing: BalanceStanding::of(balance),
            selected: state.active_client_selection() == Some(index),
        }
    }
}

/// Creates a client file with its opening fee.
pub fn add_client(office: &Office, input: NewClient) -> ApiResult<Client> {
    debug!(name = %input.name, "add_client command");
    let today = office.today();

    let client = office
        .state()
        .mutate(|state| state.create_client(input, today))?;

    office
        .notifier()
        .notify(Notification::client_created(&client));
    Ok(client)
}

pub fn list_clients(office: &Office) -> Vec<ClientSummary> {
    debug!("list_clients command");
    office.state().read(|state| {
        state
            .clients()
            .iter()
            .enumerate()
            .map(|(index, client)| ClientSummary::of(state, index, client))
            .collect()
    })
}

/// Deletes a client file by id. Unknown ids are reported, not ignored.
pub fn delete_client(office: &Office, id: &str) -> ApiResult<Client> {
    debug!(id = %id, "delete_client command");

    office.state().mutate(|state| {
        let client = hma_core::registry::find(state.clients(), id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Client", id))?;
        state.delete_client(id);
        Ok(client)
    })
}

/// Opens a client's ledger.
pub fn open_client(office: &Office, index: usize) -> ApiResult<ClientSummary> {
    debug!(index, "open_client command");

    office.state().mutate(|state| {
        state.select_client(index)?;
        state.set_view(View::ClientRegistry);
        let client = &state.clients()[index];
        Ok::<_, ApiError>(ClientSummary::of(state, index, client))
    })
}

/// Closes the open ledger.
pub fn close_client(office: &Office) -> ApiResult<()> {
    debug!("close_client command");
    office.state().mutate(|state| {
        state.close_ledger();
        Ok(())
    })
}
