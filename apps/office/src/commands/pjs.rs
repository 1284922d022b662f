//! Notarization (PJS) log commands.

use hma_core::{monthly_totals, Money, NewPjsRecord, PjsRecord, PjsSort};
use hma_sync::Notification;
use serde::Serialize;
use tracing::debug;

use crate::context::Office;
use crate::error::{ApiError, ApiResult};

/// Per-month totals of one calendar year.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    /// `[0]` is January.
    pub months: [Money; 12],
    pub total: Money,
}

/// Records a notarization and queues its notification.
pub fn add_pjs(office: &Office, input: NewPjsRecord) -> ApiResult<PjsRecord> {
    debug!(name = %input.name, "add_pjs command");
    let today = office.today();

    let record = office
        .state()
        .mutate(|state| state.add_pjs_record(input, today))?;

    office
        .notifier()
        .notify(Notification::pjs_recorded(&record));
    Ok(record)
}

/// The log in `sort` order.
pub fn list_pjs(office: &Office, sort: PjsSort) -> Vec<PjsRecord> {
    debug!(?sort, "list_pjs command");
    office
        .state()
        .read(|state| sort.apply(state.pjs_records()).into_iter().cloned().collect())
}

pub fn delete_pjs(office: &Office, id: &str) -> ApiResult<PjsRecord> {
    debug!(id = %id, "delete_pjs command");

    office.state().mutate(|state| {
        let record = hma_core::registry::find(state.pjs_records(), id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Notarization record", id))?;
        state.delete_pjs_record(id);
        Ok(record)
    })
}

pub fn monthly_summary(office: &Office, year: i32) -> MonthlySummary {
    debug!(year, "monthly_summary command");
    let months = office
        .state()
        .read(|state| monthly_totals(state.pjs_records(), year));

    MonthlySummary {
        year,
        months,
        total: months.iter().sum(),
    }
}
