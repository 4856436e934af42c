//! Settings file parsing.
//!
//! `settings.conf` uses `key = value` lines; blank lines and lines starting
//! with `#`, `//` or `;` are ignored. Unknown keys are logged and skipped.

use std::fs;
use std::path::{Path, PathBuf};

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character
/// - Keys are lowercased with `.`, `-` and spaces folded to `_`
/// - Trims whitespace and matching surrounding quotes from the value
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_val) = line.trim().split_once('=')?;
    let key = raw_key
        .trim()
        .to_lowercase()
        .replace(['.', '-', ' '], "_");
    let val = raw_val.trim();
    let val = val
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(val);
    Some((key, val.to_string()))
}

/// User settings for scanshelf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// HTTP endpoint listing inventory rows.
    pub source_url: Option<String>,
    /// JSON file holding inventory rows.
    pub source_file: Option<PathBuf>,
    /// Bearer token for `source_url`.
    pub api_token: Option<String>,
    /// Shell command that opens the barcode scanner.
    pub scan_command: Option<String>,
}

/// Where inventory rows come from, after resolving settings and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceChoice {
    /// Read rows from an HTTP endpoint.
    Http {
        /// Endpoint URL.
        url: String,
        /// Optional bearer token.
        token: Option<String>,
    },
    /// Read rows from a JSON file.
    File(PathBuf),
    /// Nothing configured.
    Unconfigured,
}

impl Settings {
    /// What: Parse settings from file content.
    ///
    /// Inputs:
    /// - `content`: Text of a `settings.conf`
    ///
    /// Output:
    /// - Parsed settings; empty values leave the field unset
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut out = Self::default();
        for line in content.lines() {
            if skip_comment_or_empty(line) {
                continue;
            }
            let Some((key, val)) = parse_key_value(line) else {
                tracing::debug!(line, "ignoring settings line without '='");
                continue;
            };
            let val = (!val.is_empty()).then_some(val);
            match key.as_str() {
                "source_url" | "inventory_url" => out.source_url = val,
                "source_file" | "inventory_file" => out.source_file = val.map(PathBuf::from),
                "api_token" | "token" => out.api_token = val,
                "scan_command" | "scanner" => out.scan_command = val,
                other => tracing::warn!(key = other, "unknown settings key"),
            }
        }
        out
    }

    /// What: Load settings from a file.
    ///
    /// Inputs:
    /// - `path`: Settings file location
    ///
    /// Output:
    /// - Parsed settings, or defaults when the file is missing or unreadable
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => {
                tracing::info!(path = %path.display(), "loaded settings");
                Self::parse(&content)
            }
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "no settings file; using defaults"
                );
                Self::default()
            }
        }
    }

    /// What: Decide which record source to use.
    ///
    /// Output:
    /// - `Http` when a URL is set, else `File` when a path is set, else `Unconfigured`
    #[must_use]
    pub fn source_choice(&self) -> SourceChoice {
        if let Some(url) = &self.source_url {
            SourceChoice::Http {
                url: url.clone(),
                token: self.api_token.clone(),
            }
        } else if let Some(path) = &self.source_file {
            SourceChoice::File(path.clone())
        } else {
            SourceChoice::Unconfigured
        }
    }
}
