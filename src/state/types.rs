//! Core value types used by scanshelf state.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One scanned product entry, validated and ready for display.
///
/// Built from a [`RawRecord`] by [`crate::logic::records::parse_record`]; a
/// `Record` always carries a non-empty `code` and a parsed timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Product code (barcode); unique and stable across fetches.
    pub code: String,
    /// When the product was scanned, in the offset the source encoded.
    pub posted_at: DateTime<FixedOffset>,
    /// Product name as entered at scan time.
    pub name: String,
    /// Product image location, if the source has one.
    pub image_uri: Option<String>,
    /// Comma-delimited free-text categories.
    pub categories_raw: Option<String>,
}

/// Column values of one row as delivered by a record source.
///
/// Every column is optional and untyped at this layer, so a wrongly typed cell
/// never fails the decode of its page; validation happens in
/// [`crate::logic::records`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawFields {
    /// Product code; sources store it either as text or as a number.
    #[serde(
        rename = "Product Code",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_code: Option<serde_json::Value>,
    /// Scan timestamp (RFC 3339 date-time or `YYYY-MM-DD`).
    #[serde(rename = "Posted", default, skip_serializing_if = "Option::is_none")]
    pub posted: Option<serde_json::Value>,
    /// Product name.
    #[serde(
        rename = "Product Name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_name: Option<serde_json::Value>,
    /// Product image URI.
    #[serde(
        rename = "Product Image",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_image: Option<serde_json::Value>,
    /// Comma-delimited categories, or a list of category names.
    #[serde(
        rename = "Product Categories",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_categories: Option<serde_json::Value>,
}

/// One unvalidated row from a record source.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Source-side row identifier, when the backend assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Column values.
    #[serde(default)]
    pub fields: RawFields,
}

/// Fetch request sent to the background fetch worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// Monotonic identifier used to correlate the response.
    pub id: u64,
}

/// Response to a prior [`FetchRequest`].
#[derive(Clone, Debug)]
pub struct FetchResponse {
    /// Echoed identifier from the originating request.
    pub id: u64,
    /// Validated records in source order, or the failure message.
    pub result: Result<Vec<Record>, String>,
}

/// Navigation requests the inventory screen can issue to its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Hand off to the external barcode scanner.
    Scanner,
}

/// Focus signal emitted by the lifecycle host; carries no payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusEvent {
    /// The inventory screen became the active view.
    Focused,
    /// The inventory screen stopped being the active view.
    Blurred,
}
