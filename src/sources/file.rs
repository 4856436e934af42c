//! Local JSON file record source.

use std::path::{Path, PathBuf};

use crate::state::RawRecord;

use super::{RecordSource, Result, decode_page};

/// Reads inventory rows from a JSON file on disk.
///
/// The file holds either the `{"records": [...]}` envelope or a bare array.
/// It is re-read on every fetch, so edits show up on the next refresh.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    /// File to read.
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    async fn list_inventory_records(&self) -> Result<Vec<RawRecord>> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| format!("Cannot read {}: {e}", self.path.display()))?;
        let (rows, offset) = decode_page(&body)
            .map_err(|e| format!("Invalid inventory file {}: {e}", self.path.display()))?;
        if offset.is_some() {
            tracing::debug!(
                path = %self.path.display(),
                "ignoring continuation token in file source"
            );
        }
        tracing::debug!(
            path = %self.path.display(),
            rows = rows.len(),
            "read inventory file"
        );
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    /// What: Rows are read from an envelope file in order.
    ///
    /// Inputs:
    /// - Temp file with two rows.
    ///
    /// Output:
    /// - Two rows with the codes in file order.
    async fn reads_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let body = r#"{"records":[
            {"fields":{"Product Code":"B"}},
            {"fields":{"Product Code":"A"}}
        ]}"#;
        file.write_all(body.as_bytes()).expect("write");
        let src = JsonFileSource::new(file.path());
        let rows = src.list_inventory_records().await.expect("rows");
        let codes: Vec<_> = rows
            .iter()
            .filter_map(|r| r.fields.product_code.as_ref())
            .filter_map(serde_json::Value::as_str)
            .collect();
        assert_eq!(codes, vec!["B", "A"]);
    }

    #[tokio::test]
    /// What: A missing file is a fetch failure naming the path.
    ///
    /// Inputs:
    /// - Path inside an empty temp dir.
    ///
    /// Output:
    /// - `Err` whose message contains the file name.
    async fn missing_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let src = JsonFileSource::new(dir.path().join("absent.json"));
        let err = src.list_inventory_records().await.expect_err("missing");
        assert!(err.to_string().contains("absent.json"));
    }

    #[tokio::test]
    /// What: Garbage content is a fetch failure, not an empty result.
    ///
    /// Inputs:
    /// - Temp file containing `not json`.
    ///
    /// Output:
    /// - `Err`.
    async fn garbage_file_fails() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");
        let src = JsonFileSource::new(file.path());
        assert!(src.list_inventory_records().await.is_err());
    }
}
