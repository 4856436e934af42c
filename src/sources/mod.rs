//! Record sources: where inventory rows come from.
//!
//! A source returns the full current collection (never a delta). An empty
//! collection is `Ok(vec![])`; any failure is an `Err`.

use std::future::Future;

use serde::Deserialize;
use serde_json::Value;

use crate::logic::decode_row;
use crate::state::RawRecord;

mod file;
mod http;

pub use file::JsonFileSource;
pub use http::{HttpSource, MAX_PAGES};

pub(crate) type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// External collaborator that lists inventory rows.
pub trait RecordSource: Send + Sync + 'static {
    /// What: Fetch every inventory row currently stored.
    ///
    /// Output:
    /// - `Ok(rows)` in source order, possibly empty
    ///
    /// # Errors
    /// - Any transport, I/O or decode failure
    fn list_inventory_records(&self) -> impl Future<Output = Result<Vec<RawRecord>>> + Send;

    /// Short human-readable description for the status line and logs.
    fn describe(&self) -> String;
}

/// Stand-in used when neither a file nor a URL is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredSource;

impl RecordSource for UnconfiguredSource {
    async fn list_inventory_records(&self) -> Result<Vec<RawRecord>> {
        Err("No record source configured; set source_url or source_file in settings.conf".into())
    }

    fn describe(&self) -> String {
        "no source".to_string()
    }
}

/// One page of rows as served by a backend.
///
/// Accepts either the `{"records": [...], "offset": "..."}` envelope or a bare
/// array of rows. Rows stay raw JSON here so one bad entry cannot fail the page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecordPage {
    /// Envelope with an optional continuation token.
    Envelope {
        /// Rows on this page.
        records: Vec<Value>,
        /// Token for the next page, when more rows exist.
        #[serde(default)]
        offset: Option<String>,
    },
    /// Bare list of rows; always the last page.
    Rows(Vec<Value>),
}

impl RecordPage {
    /// Split into rows and continuation token.
    pub(crate) fn into_parts(self) -> (Vec<Value>, Option<String>) {
        match self {
            Self::Envelope { records, offset } => (records, offset.filter(|o| !o.is_empty())),
            Self::Rows(rows) => (rows, None),
        }
    }
}

/// What: Decode a JSON body into a page of rows.
///
/// Inputs:
/// - `body`: Response or file text
///
/// Output:
/// - Rows and continuation token
///
/// Details:
/// - Entries that are not row objects are logged and skipped.
///
/// # Errors
/// - When the text is neither an envelope nor an array
pub(crate) fn decode_page(body: &str) -> Result<(Vec<RawRecord>, Option<String>)> {
    let page: RecordPage = serde_json::from_str(body)?;
    let (entries, offset) = page.into_parts();
    let rows = entries
        .into_iter()
        .filter_map(|entry| match decode_row(entry) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed inventory record");
                None
            }
        })
        .collect();
    Ok((rows, offset))
}
