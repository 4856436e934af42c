//! Validation of raw source rows into [`Record`]s.
//!
//! A row that cannot become a record is dropped from the collection instead of
//! failing the whole fetch.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::Value;

use crate::state::{RawRecord, Record};

/// Why a raw row was excluded from the collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedRecord {
    /// The row has no product code, or the code is blank.
    MissingCode {
        /// Source-side row id, when known.
        row_id: Option<String>,
    },
    /// The scan timestamp is missing or cannot be parsed.
    BadPostedAt {
        /// Product code of the offending row.
        code: String,
        /// Raw timestamp text, if any was present.
        value: Option<String>,
    },
    /// The entry is not a row object at all (for example a bare number).
    Undecodable {
        /// Decoder message.
        reason: String,
    },
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCode { row_id } => write!(
                f,
                "row {} has no product code",
                row_id.as_deref().unwrap_or("<unknown>")
            ),
            Self::BadPostedAt { code, value } => match value {
                Some(v) => write!(f, "record {code} has unparseable scan time {v:?}"),
                None => write!(f, "record {code} has no scan time"),
            },
            Self::Undecodable { reason } => write!(f, "undecodable inventory row: {reason}"),
        }
    }
}

impl std::error::Error for MalformedRecord {}

/// What: Read the product code column as text.
///
/// Inputs:
/// - `value`: Column value (string or number)
///
/// Output:
/// - Trimmed code, or `None` when the column is blank or of another JSON type
fn code_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// What: Read a scalar column as text.
///
/// Inputs:
/// - `value`: Column value of any JSON type
///
/// Output:
/// - Strings as-is, numbers and booleans rendered; `None` for null, lists and maps
fn scalar_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// What: Read the categories column.
///
/// Inputs:
/// - `value`: Comma-delimited text, or a list of category names
///
/// Output:
/// - Comma-delimited text; list items that are not strings are skipped
fn categories_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => scalar_text(Some(other)),
    }
}

/// What: Parse a scan timestamp.
///
/// Inputs:
/// - `raw`: Timestamp text from the source
///
/// Output:
/// - Parsed instant with its original offset, or `None`
///
/// Details:
/// - Accepts RFC 3339 date-times as written by the backend.
/// - Accepts bare `YYYY-MM-DD` dates, read as midnight UTC.
#[must_use]
pub fn parse_posted_at(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
}

/// What: Validate one raw row.
///
/// Inputs:
/// - `raw`: Row as delivered by the source
///
/// Output:
/// - `Ok(Record)` for a usable row, `Err(MalformedRecord)` otherwise
///
/// # Errors
/// - `MissingCode` when the product code is absent or blank
/// - `BadPostedAt` when the scan time is absent or unparseable
pub fn parse_record(raw: RawRecord) -> Result<Record, MalformedRecord> {
    let RawRecord { id, fields } = raw;
    let Some(code) = code_text(fields.product_code.as_ref()) else {
        return Err(MalformedRecord::MissingCode { row_id: id });
    };
    let posted_at = match &fields.posted {
        Some(Value::String(s)) => parse_posted_at(s),
        _ => None,
    };
    let Some(posted_at) = posted_at else {
        let value = match fields.posted {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        return Err(MalformedRecord::BadPostedAt { code, value });
    };
    let image_uri = match fields.product_image {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    };
    Ok(Record {
        code,
        posted_at,
        name: scalar_text(fields.product_name).unwrap_or_default(),
        image_uri,
        categories_raw: categories_text(fields.product_categories),
    })
}

/// What: Decode one entry of a fetched page into a raw row.
///
/// Inputs:
/// - `value`: One element of the page's row list
///
/// Output:
/// - `Ok(RawRecord)` for any JSON object shaped like a row
///
/// # Errors
/// - `Undecodable` when the entry is not a row object
pub fn decode_row(value: Value) -> Result<RawRecord, MalformedRecord> {
    serde_json::from_value(value).map_err(|e| MalformedRecord::Undecodable {
        reason: e.to_string(),
    })
}

/// What: Validate a fetched page of rows, keeping source order.
///
/// Inputs:
/// - `rows`: Raw rows in source order
///
/// Output:
/// - Usable records in the same order; malformed rows are logged and skipped
pub fn normalize(rows: Vec<RawRecord>) -> Vec<Record> {
    let total = rows.len();
    let records: Vec<Record> = rows
        .into_iter()
        .filter_map(|raw| match parse_record(raw) {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed inventory record");
                None
            }
        })
        .collect();
    if records.len() != total {
        tracing::info!(
            kept = records.len(),
            dropped = total - records.len(),
            "normalized inventory rows"
        );
    }
    records
}
