//! Pure logic: record validation and presentation formatting.

pub mod format;
pub mod records;

pub use format::{CardView, format_date, is_recent, tokenize_categories};
pub use records::{MalformedRecord, decode_row, normalize, parse_record};
