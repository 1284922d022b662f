//! # Text Rendering
//!
//! Plain-text layouts for listings and documents. Every function returns a
//! `String`; printing is left to the CLI.
//!
//! ## Document Layout
//! ```text
//! ============================================================
//!                   HAIRI MUSTAFA ASSOCIATES
//!   Lot 02, Bangunan Arked Mara, 09100 Baling, Kedah Darul Aman
//!           Tel: +604-470 1234 • Faks: +604-470 5678
//!               Portal: www.hairimustafa.com.my
//! ============================================================
//! RESIT RASMI                          No. Rujukan RES-20250001
//! Diterima Daripada / Nama Fail: ALI
//! Tarikh Dokumen: 2025-06-01
//! ------------------------------------------------------------
//! KHIDMAT GUAMAN (x2)                             RM 2,500.00
//! BAYARAN                                     RM 500.00 (CR)
//! ------------------------------------------------------------
//! JUMLAH BAYARAN RASMI DITERIMA                   RM 2,000.00
//!                                              Ringgit Malaysia
//! ```

use std::fmt::Write as _;

use hma_core::validation::DATE_FORMAT;
use hma_core::{Document, Money, PjsRecord, ServiceItem};
use serde::Serialize;

use crate::commands::client::ClientSummary;
use crate::commands::ledger::LedgerView;
use crate::commands::pjs::MonthlySummary;
use crate::error::ApiResult;

const WIDTH: usize = 60;

const ADDRESS_LINES: [&str; 3] = [
    "Lot 02, Bangunan Arked Mara, 09100 Baling, Kedah Darul Aman",
    "Tel: +604-470 1234 • Faks: +604-470 5678",
    "Portal: www.hairimustafa.com.my",
];

const REFERENCE_LABEL: &str = "No. Rujukan";
const CUSTOMER_LABEL: &str = "Diterima Daripada / Nama Fail:";
const DATE_LABEL: &str = "Tarikh Dokumen:";
const STATEMENT_TOTAL_LABEL: &str = "BAKI AKHIR FAIL PELANGGAN";
const RECEIPT_TOTAL_LABEL: &str = "JUMLAH BAYARAN RASMI DITERIMA";
const CURRENCY_FOOTER: &str = "Ringgit Malaysia";

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAC", "APR", "MEI", "JUN", "JUL", "OGO", "SEP", "OKT", "NOV", "DIS",
];

/// Pretty JSON for `--json` output.
pub fn json<T: Serialize>(value: &T) -> ApiResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Credits print as a positive amount marked `(CR)`.
pub fn document_amount(amount: Money) -> String {
    if amount.is_negative() {
        format!("{} (CR)", -amount)
    } else {
        amount.to_string()
    }
}

fn centered(out: &mut String, text: &str) {
    let _ = writeln!(out, "{:^width$}", text, width = WIDTH);
}

fn spread(out: &mut String, left: &str, right: &str) {
    let used = left.chars().count() + right.chars().count();
    let gap = WIDTH.saturating_sub(used).max(1);
    let _ = writeln!(out, "{}{}{}", left, " ".repeat(gap), right);
}

/// Receipt or statement, laid out for printing.
pub fn document(doc: &Document, firm_name: &str, logo: &str) -> String {
    let mut out = String::new();
    let rule = "=".repeat(WIDTH);
    let thin = "-".repeat(WIDTH);

    let _ = writeln!(out, "{}", rule);
    centered(&mut out, firm_name);
    for line in ADDRESS_LINES {
        centered(&mut out, line);
    }
    centered(&mut out, &format!("[logo: {}]", logo_label(logo)));
    let _ = writeln!(out, "{}", rule);

    spread(
        &mut out,
        doc.title(),
        &format!("{} {}", REFERENCE_LABEL, doc.document_number()),
    );
    let _ = writeln!(out, "{} {}", CUSTOMER_LABEL, doc.customer_name());
    let _ = writeln!(out, "{} {}", DATE_LABEL, doc.date().format(DATE_FORMAT));
    let _ = writeln!(out, "{}", thin);

    for line in doc.line_items() {
        spread(&mut out, &line.name, &document_amount(line.amount));
    }
    let _ = writeln!(out, "{}", thin);

    let total_label = if doc.is_statement() {
        STATEMENT_TOTAL_LABEL
    } else {
        RECEIPT_TOTAL_LABEL
    };
    spread(&mut out, total_label, &document_amount(doc.total()));
    let _ = writeln!(out, "{:>width$}", CURRENCY_FOOTER, width = WIDTH);
    out
}

/// Uploaded logos are data URLs; only their type is worth printing.
fn logo_label(logo: &str) -> &str {
    match logo.strip_prefix("data:") {
        Some(rest) => rest.split(';').next().unwrap_or("embedded"),
        None => logo,
    }
}

pub fn client_list(clients: &[ClientSummary]) -> String {
    if clients.is_empty() {
        return "No client files.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<20} {:<16} {:>16}  {}",
        "#", "NAME", "DETAIL", "BALANCE", "STATUS"
    );
    for client in clients {
        let marker = if client.selected { "*" } else { " " };
        let _ = writeln!(
            out,
            "{:>3}{} {:<20} {:<16} {:>16}  {}  {}",
            client.index,
            marker,
            client.name,
            client.detail,
            client.balance.to_string(),
            client.standing.label(),
            client.id
        );
    }
    out
}

pub fn ledger(view: &LedgerView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}) [{}]", view.name, view.detail, view.client_id);
    let _ = writeln!(
        out,
        "{:>3}  {:<10}  {:<30} {:>14} {:>14}",
        "#", "DATE", "DESCRIPTION", "AMOUNT", "BALANCE"
    );
    for row in &view.rows {
        let _ = writeln!(
            out,
            "{:>3}  {:<10}  {:<30} {:>14} {:>14}",
            row.position,
            row.date.format(DATE_FORMAT).to_string(),
            row.desc,
            row.amt.to_string(),
            row.running.to_string()
        );
    }
    let _ = writeln!(out, "BALANCE {} ({})", view.balance, view.standing.label());
    out
}

pub fn pjs_list(records: &[PjsRecord]) -> String {
    if records.is_empty() {
        return "No notarization records.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{}  {:<24} {:<16} {:>14}  {}",
            record.date.format(DATE_FORMAT),
            record.name,
            record.detail,
            record.amount.to_string(),
            record.id
        );
    }
    let total: Money = records.iter().map(|r| r.amount).sum();
    let _ = writeln!(out, "{} records, total {}", records.len(), total);
    out
}

pub fn monthly(summary: &MonthlySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Notarization totals {}", summary.year);
    for (name, amount) in MONTHS.iter().zip(summary.months.iter()) {
        let _ = writeln!(out, "  {}  {:>16}", name, amount.to_string());
    }
    let _ = writeln!(out, "  ALL  {:>16}", summary.total.to_string());
    out
}

pub fn service_list(items: &[ServiceItem]) -> String {
    if items.is_empty() {
        return "Price list is empty.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "{:<32} {:>14}  {}",
            item.name,
            item.price.to_string(),
            item.id
        );
    }
    out
}
