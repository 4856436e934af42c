//! Presentation values derived from a [`Record`].
//!
//! Everything here is pure: the only input besides the record is the wall-clock
//! instant the caller passes in.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::state::Record;

/// Records scanned within this window are flagged as new.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// What: Decide whether a record counts as recently scanned.
///
/// Inputs:
/// - `posted_at`: Scan timestamp of the record
/// - `now`: Current wall-clock instant
///
/// Output:
/// - `true` when `now - posted_at` is strictly less than seven days
///
/// Details:
/// - Exactly seven days is not recent.
/// - Future-dated records yield a negative age and therefore count as recent.
#[must_use]
pub fn is_recent(posted_at: DateTime<FixedOffset>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(posted_at) < Duration::days(RECENT_WINDOW_DAYS)
}

/// What: Render a scan timestamp as `DD.MM.YYYY`.
///
/// Inputs:
/// - `posted_at`: Scan timestamp of the record
///
/// Output:
/// - Zero-padded day and month with a four-digit year
///
/// Details:
/// - Uses the calendar date in the offset the timestamp already carries; no
///   conversion to local time.
#[must_use]
pub fn format_date(posted_at: DateTime<FixedOffset>) -> String {
    posted_at.format("%d.%m.%Y").to_string()
}

/// What: Split the free-text category column into tag tokens.
///
/// Inputs:
/// - `raw`: Comma-delimited category text, if the record has one
///
/// Output:
/// - `None` when the column is absent or empty (no tag section)
/// - `Some(tokens)` otherwise, one entry per comma-separated segment
///
/// Details:
/// - Each token is trimmed; order and duplicates are kept.
/// - Empty tokens from doubled or trailing commas are kept as `""`.
#[must_use]
pub fn tokenize_categories(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw.filter(|s| !s.is_empty())?;
    Some(raw.split(',').map(|t| t.trim().to_string()).collect())
}

/// Display-ready projection of one [`Record`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    /// Record key; also the key of the card's state.
    pub code: String,
    /// Product name.
    pub name: String,
    /// Product image location, if any.
    pub image_uri: Option<String>,
    /// Scan date as `DD.MM.YYYY`.
    pub date: String,
    /// Whether the record is inside the recent window.
    pub is_new: bool,
    /// Tokenized categories; `None` means no tag section.
    pub categories: Option<Vec<String>>,
}

impl CardView {
    /// What: Map a record through the formatters.
    ///
    /// Inputs:
    /// - `record`: Source record
    /// - `now`: Current instant used for the recency flag
    ///
    /// Output:
    /// - `CardView` with derived date, recency and tag values
    #[must_use]
    pub fn from_record(record: &Record, now: DateTime<Utc>) -> Self {
        Self {
            code: record.code.clone(),
            name: record.name.clone(),
            image_uri: record.image_uri.clone(),
            date: format_date(record.posted_at),
            is_new: is_recent(record.posted_at, now),
            categories: tokenize_categories(record.categories_raw.as_deref()),
        }
    }
}
