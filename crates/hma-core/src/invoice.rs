//! # Invoice / Receipt Assembler
//!
//! Turns a cart of service lines into an immutable receipt, and a client's
//! ledger into a statement.
//!
//! ## Receipt Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Price list ──add_service()──► Cart line {name, unit_price, qty}        │
//! │                                   │  (values copied, no live link)      │
//! │                                   ▼                                     │
//! │                   set_name / set_unit_price / set_quantity / remove     │
//! │                                   │                                     │
//! │  Customer: client name | CASH     ▼                                     │
//! │                        ApplicationState::finalize_invoice(&mut cart)    │
//! │                                   │                                     │
//! │             ┌─────────────────────┴─────────────────────┐               │
//! │             ▼                                           ▼               │
//! │   no customer / empty cart                  Document (RESIT RASMI)      │
//! │   → ValidationError                         counter += 1                │
//! │   → counter untouched                       cart + customer cleared     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::state::ApplicationState;
use crate::types::{Client, ServiceItem};
use crate::validation::{ValidationResult, DATE_FORMAT};

pub const RECEIPT_TITLE: &str = "RESIT RASMI";
pub const STATEMENT_TITLE: &str = "PENYATA AKAUN FAIL";
pub const CASH_CUSTOMER: &str = "PELANGGAN TUNAI";

/// `RES-<year><counter:04>`, e.g. `RES-20250007`.
pub fn receipt_number(year: i32, counter: u32) -> String {
    format!("RES-{}{:04}", year, counter)
}

/// `STMT-<unix millis>`.
pub fn statement_number(unix_millis: i64) -> String {
    format!("STMT-{}", unix_millis)
}

// =============================================================================
// Customer
// =============================================================================

/// Who the receipt is made out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Customer {
    /// A client file, by name.
    Client(String),
    /// Walk-in cash customer.
    Cash,
}

impl Customer {
    /// `CASH` (any case) selects the cash customer, anything else a name.
    /// Blank input selects nobody.
    pub fn parse(input: &str) -> Option<Customer> {
        let input = input.trim();
        if input.is_empty() {
            None
        } else if input.eq_ignore_ascii_case("cash") {
            Some(Customer::Cash)
        } else {
            Some(Customer::Client(input.to_string()))
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Customer::Client(name) => name,
            Customer::Cash => CASH_CUSTOMER,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// One editable line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLine {
    #[inline]
    pub fn amount(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Receipt label: `name (xQ)` when Q > 1.
    pub fn label(&self) -> String {
        if self.quantity > 1 {
            format!("{} (x{})", self.name, self.quantity)
        } else {
            self.name.clone()
        }
    }
}

/// Quantity typed by the operator. Anything that is not a whole number is
/// 0, and so is a negative one: a line can be zeroed but never credited
/// through its quantity.
fn parse_quantity(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

/// The in-progress invoice.
///
/// Edits at a position that does not exist are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    customer: Option<Customer>,
    date: NaiveDate,
}

impl Cart {
    /// Empty cart dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Cart {
            lines: Vec::new(),
            customer: None,
            date: today,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line amounts, recomputed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::amount).sum()
    }

    pub fn set_customer(&mut self, customer: Option<Customer>) {
        self.customer = customer;
    }

    /// Changes the document date. Defaults to the day the cart was opened.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Adds one of `service`, copying its current name and price.
    pub fn add_service(&mut self, service: &ServiceItem) {
        self.add_line(service.name.clone(), service.price, 1);
    }

    pub fn add_line(&mut self, name: impl Into<String>, unit_price: Money, quantity: u32) {
        self.lines.push(CartLine {
            name: name.into(),
            unit_price,
            quantity,
        });
    }

    pub fn set_name(&mut self, position: usize, name: &str) {
        if let Some(line) = self.lines.get_mut(position) {
            line.name = name.to_string();
        }
    }

    /// Unparseable prices become 0.
    pub fn set_unit_price(&mut self, position: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(position) {
            line.unit_price = Money::parse_or_zero(text);
        }
    }

    /// Unparseable quantities become 0.
    pub fn set_quantity(&mut self, position: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(position) {
            line.quantity = parse_quantity(text);
        }
    }

    pub fn remove_line(&mut self, position: usize) {
        if position < self.lines.len() {
            self.lines.remove(position);
        }
    }

    /// Empties the lines and customer. The date is kept.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.customer = None;
    }
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLine {
    pub name: String,
    pub amount: Money,
}

/// A printable receipt or statement. Built once, never edited.
///
/// `total` always equals the sum of `line_items` amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    title: String,
    customer_name: String,
    document_number: String,
    date: NaiveDate,
    line_items: Vec<DocumentLine>,
    total: Money,
    is_statement: bool,
}

impl Document {
    fn build(
        title: &str,
        customer_name: String,
        document_number: String,
        date: NaiveDate,
        line_items: Vec<DocumentLine>,
        is_statement: bool,
    ) -> Self {
        let total = line_items.iter().map(|l| l.amount).sum();
        Document {
            title: title.to_string(),
            customer_name,
            document_number,
            date,
            line_items,
            total,
            is_statement,
        }
    }

    /// Statement of a client's ledger. One line per entry, raw signed
    /// amounts, total equal to the current balance.
    pub fn statement(client: &Client, today: NaiveDate, unix_millis: i64) -> Self {
        let line_items = client
            .ledger
            .iter()
            .map(|entry| DocumentLine {
                name: format!("{} - {}", entry.date.format(DATE_FORMAT), entry.desc),
                amount: entry.amt,
            })
            .collect();
        Document::build(
            STATEMENT_TITLE,
            client.name.clone(),
            statement_number(unix_millis),
            today,
            line_items,
            true,
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn line_items(&self) -> &[DocumentLine] {
        &self.line_items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_statement(&self) -> bool {
        self.is_statement
    }
}

// =============================================================================
// Finalize
// =============================================================================

impl ApplicationState {
    /// Receipt number the next successful finalize will use.
    pub fn next_receipt_number(&self, year: i32) -> String {
        receipt_number(year, self.invoice_counter)
    }

    /// Issues a receipt for `cart`.
    ///
    /// Fails with no change to the counter or the cart when the customer is
    /// missing, the cart is empty, or the counter has run out of numbers.
    /// On success the counter advances by one and the cart is cleared.
    pub fn finalize_invoice(&mut self, cart: &mut Cart) -> ValidationResult<Document> {
        let customer = cart.customer().ok_or_else(|| ValidationError::Required {
            field: "customer".to_string(),
        })?;
        if cart.is_empty() {
            return Err(ValidationError::Empty {
                field: "cart".to_string(),
            });
        }
        let next_counter =
            self.invoice_counter
                .checked_add(1)
                .ok_or_else(|| ValidationError::OutOfRange {
                    field: "invoiceCounter".to_string(),
                    min: 1,
                    max: i64::from(u32::MAX) - 1,
                })?;

        let line_items = cart
            .lines()
            .iter()
            .map(|line| DocumentLine {
                name: line.label(),
                amount: line.amount(),
            })
            .collect();

        let document = Document::build(
            RECEIPT_TITLE,
            customer.display_name().to_string(),
            self.next_receipt_number(cart.date().year()),
            cart.date(),
            line_items,
            false,
        );

        self.invoice_counter = next_counter;
        cart.clear();
        Ok(document)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
