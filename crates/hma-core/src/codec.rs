//! # CSV Codec
//!
//! Text encoding for the import/export files.
//!
//! ## File Format
//! ```text
//! \u{FEFF}Name,Detail,Balance          ← BOM + header names joined by ','
//! "AMIRA","N.Anak","2500.00"           ← every field quoted
//! "SAY ""HI"", OK","",""               ← inner quotes doubled
//! ```
//!
//! ## Decoding Rules
//! - leading BOM stripped, lines split on `\n` or `\r\n`
//! - first line = header names, trimmed and lowercased
//! - a comma splits fields only outside quotes (quote-parity per line)
//! - each value trimmed, one enclosing quote pair stripped, `""` → `"`
//! - blank lines skipped, fewer than 2 lines → no rows
//!
//! Values are always strings here. Typed coercion happens in
//! [`crate::transfer`].
//!
//! Fields containing a line break do not survive a round trip: decoding is
//! line oriented.

use std::collections::BTreeMap;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{CoreError, CoreResult};

/// Byte-order mark written at the start of every export.
pub const BOM: char = '\u{FEFF}';

/// One decoded row: lowercased header name → raw value.
pub type Row = BTreeMap<String, String>;

// =============================================================================
// Encode
// =============================================================================

/// Encodes `rows` under `headers`.
///
/// Each row is looked up by the lowercased header name; absent keys become
/// empty fields. Row order is preserved.
pub fn encode(headers: &[&str], rows: &[Row]) -> CoreResult<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let keys: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    for row in rows {
        writer.write_record(
            keys.iter()
                .map(|key| row.get(key).map(String::as_str).unwrap_or("")),
        )?;
    }

    let body = writer
        .into_inner()
        .map_err(|err| CoreError::Encode(err.to_string()))?;
    let body = String::from_utf8(body).map_err(|err| CoreError::Encode(err.to_string()))?;

    let mut out = String::with_capacity(body.len() + 64);
    out.push(BOM);
    out.push_str(&headers.join(","));
    if !body.is_empty() {
        out.push('\n');
        out.push_str(body.strip_suffix('\n').unwrap_or(&body));
    }
    Ok(out)
}

// =============================================================================
// Decode
// =============================================================================

/// Decodes CSV text into rows keyed by lowercased header name.
///
/// Never fails: malformed input yields fewer (possibly zero) rows, and the
/// caller decides whether that is an error.
pub fn decode(text: &str) -> Vec<Row> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.len() < 2 {
        return Vec::new();
    }

    let headers: Vec<String> = split_fields(lines[0])
        .into_iter()
        .map(|h| h.to_lowercase())
        .collect();

    lines[1..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut values = split_fields(line).into_iter();
            headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// Splits a line on commas outside quotes and cleans each field.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => fields.push(clean_field(&std::mem::take(&mut current))),
            _ => current.push(ch),
        }
    }
    fields.push(clean_field(&current));
    fields
}

/// Trims, strips one enclosing quote pair and un-doubles inner quotes.
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => trimmed.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
