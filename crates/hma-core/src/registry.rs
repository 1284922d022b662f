//! # Record Registries
//!
//! The notarization log and the service price list. Both are flat
//! collections with add / delete / replace-all.
//!
//! | Registry | add order | default traversal |
//! |---|---|---|
//! | `pjs_records` | prepend | newest first |
//! | `inventory` | append | insertion order |
//!
//! `replace_*` is the import path and discards the existing collection.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::state::ApplicationState;
use crate::types::{new_id, Client, PjsRecord, ServiceItem};
use crate::validation::{optional_upper, require_amount, require_upper, ValidationResult};

// =============================================================================
// Identity Lookups
// =============================================================================

/// Anything stored with a unique string id.
pub trait Record {
    fn id(&self) -> &str;
}

impl Record for Client {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for PjsRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for ServiceItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Finds a record by id.
pub fn find<'a, T: Record>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Filters out the record with `id`. Returns whether anything was removed.
pub(crate) fn remove_by_id<T: Record>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

// =============================================================================
// Inputs
// =============================================================================

/// Form input for a notarization record.
#[derive(Debug, Clone, Default)]
pub struct NewPjsRecord {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub name: String,
    pub detail: String,
    pub amount: String,
}

impl NewPjsRecord {
    /// `name` and `amount` are required. Text fields are uppercased.
    pub fn into_record(self, today: NaiveDate) -> ValidationResult<PjsRecord> {
        let name = require_upper("name", &self.name)?;
        let amount = require_amount("amount", &self.amount)?;
        Ok(PjsRecord {
            id: new_id(),
            date: self.date.unwrap_or(today),
            name,
            detail: optional_upper(&self.detail),
            amount,
        })
    }
}

/// Form input for a price-list entry.
#[derive(Debug, Clone, Default)]
pub struct NewServiceItem {
    pub name: String,
    pub price: String,
}

impl NewServiceItem {
    /// `name` and `price` are required; `name` is uppercased.
    pub fn into_item(self) -> ValidationResult<ServiceItem> {
        let name = require_upper("name", &self.name)?;
        let price = require_amount("price", &self.price)?;
        Ok(ServiceItem {
            id: new_id(),
            name,
            price,
        })
    }
}

// =============================================================================
// State Mutations
// =============================================================================

impl ApplicationState {
    /// Adds a notarization record at the front of the log.
    pub fn add_pjs_record(
        &mut self,
        input: NewPjsRecord,
        today: NaiveDate,
    ) -> ValidationResult<PjsRecord> {
        let record = input.into_record(today)?;
        self.pjs_records.insert(0, record.clone());
        Ok(record)
    }

    pub fn delete_pjs_record(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.pjs_records, id)
    }

    pub fn replace_pjs_records(&mut self, records: Vec<PjsRecord>) {
        self.pjs_records = records;
    }

    /// Adds a service at the end of the price list.
    pub fn add_service(&mut self, input: NewServiceItem) -> ValidationResult<ServiceItem> {
        let item = input.into_item()?;
        self.inventory.push(item.clone());
        Ok(item)
    }

    pub fn delete_service(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.inventory, id)
    }

    pub fn replace_services(&mut self, items: Vec<ServiceItem>) {
        self.inventory = items;
    }
}

// =============================================================================
// Sortable View
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PjsSortKey {
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort order for the notarization log view.
///
/// ```text
/// toggle(same key)      : Ascending ⇄ Descending
/// toggle(different key) : key = new key, Ascending
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjsSort {
    pub key: PjsSortKey,
    pub direction: SortDirection,
}

impl Default for PjsSort {
    /// Newest first.
    fn default() -> Self {
        PjsSort {
            key: PjsSortKey::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl PjsSort {
    pub fn new(key: PjsSortKey, direction: SortDirection) -> Self {
        PjsSort { key, direction }
    }

    /// Applies a click on a column header.
    pub fn toggle(self, key: PjsSortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        PjsSort { key, direction }
    }

    /// Returns the records in this order. Stable: ties keep stored order.
    pub fn apply<'a>(&self, records: &'a [PjsRecord]) -> Vec<&'a PjsRecord> {
        let mut sorted: Vec<&PjsRecord> = records.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering: Ordering = match self.key {
                PjsSortKey::Date => a.date.cmp(&b.date),
                PjsSortKey::Amount => a.amount.cmp(&b.amount),
            };
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        sorted
    }
}

/// Sum of record amounts per calendar month (`[0]` = January) in `year`.
pub fn monthly_totals(records: &[PjsRecord], year: i32) -> [Money; 12] {
    let mut totals = [Money::zero(); 12];
    for record in records.iter().filter(|r| r.date.year() == year) {
        totals[record.date.month0() as usize] += record.amount;
    }
    totals
}

// =============================================================================
// Unit Tests
// =============================================================================
