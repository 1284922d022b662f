//! # Invoice Command
//!
//! The cart exists only for the duration of one command: it is filled from
//! the request, finalized, and discarded.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  InvoiceRequest ──► mutate(|state| {                                    │
//! │                        cart = Cart::new(today), set_date if given       │
//! │                        services ──► find in price list ──► add_service  │
//! │                        lines    ──► add_line                            │
//! │                        finalize_invoice  (counter + 1)                  │
//! │                     }) ──► Document                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use hma_core::{registry, Cart, Customer, Document, Money};
use tracing::{debug, info};

use crate::context::Office;
use crate::error::{ApiError, ApiResult};

/// A price-list item with a quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePick {
    pub id: String,
    pub quantity: u32,
}

/// A line typed in by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualLine {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default)]
pub struct InvoiceRequest {
    /// Client name, or `CASH`.
    pub customer: String,
    pub services: Vec<ServicePick>,
    pub lines: Vec<ManualLine>,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
}

/// Builds and finalizes a receipt. Nothing changes when it fails.
pub fn issue_invoice(office: &Office, request: InvoiceRequest) -> ApiResult<Document> {
    debug!(
        customer = %request.customer,
        services = request.services.len(),
        lines = request.lines.len(),
        "issue_invoice command"
    );
    let today = office.today();

    let document = office.state().mutate(|state| {
        let mut cart = Cart::new(today);
        if let Some(date) = request.date {
            cart.set_date(date);
        }
        cart.set_customer(Customer::parse(&request.customer));

        for pick in &request.services {
            let item = registry::find(state.inventory(), &pick.id)
                .ok_or_else(|| ApiError::not_found("Service", &pick.id))?;
            cart.add_service(item);
            let position = cart.lines().len() - 1;
            cart.set_quantity(position, &pick.quantity.to_string());
        }
        for line in &request.lines {
            cart.add_line(line.name.clone(), line.unit_price, line.quantity);
        }

        Ok::<_, ApiError>(state.finalize_invoice(&mut cart)?)
    })?;

    info!(
        number = %document.document_number(),
        total = %document.total(),
        "Receipt issued"
    );
    Ok(document)
}
