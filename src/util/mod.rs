//! Small helpers shared across modules: URL encoding and config locations.

use std::env;
use std::fmt::Write;
use std::path::{Path, PathBuf};

pub mod config;

/// Directory name under the XDG config base.
const APP_DIR: &str = "scanshelf";

/// What: Percent-encode a string for use in URLs according to RFC 3986.
///
/// Inputs:
/// - `input`: String to encode.
///
/// Output:
/// - Returns a percent-encoded string where reserved characters are escaped.
///
/// Details:
/// - Unreserved characters as per RFC 3986 (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`)
///   are left as-is.
/// - Space is encoded as `%20` (not `+`).
/// - All other bytes are encoded as two uppercase hexadecimal digits prefixed by `%`.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

/// What: Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// What: Config directory for scanshelf, ensured to exist when possible.
///
/// Inputs:
/// - `override_dir`: Directory passed on the command line, if any
///
/// Output:
/// - `override_dir`, else `$XDG_CONFIG_HOME/scanshelf`, else `$HOME/.config/scanshelf`
pub fn config_dir(override_dir: Option<&Path>) -> PathBuf {
    let dir = override_dir.map_or_else(
        || xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR),
        Path::to_path_buf,
    );
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under the config directory (ensured to exist).
pub fn logs_dir(config_dir: &Path) -> PathBuf {
    let dir = config_dir.join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Settings file inside the config directory.
#[must_use]
pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join("settings.conf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Reserved characters are escaped and unreserved ones kept.
    ///
    /// Inputs:
    /// - `"itr/1 x~a"`.
    ///
    /// Output:
    /// - `"itr%2F1%20x~a"`.
    fn percent_encode_escapes_reserved() {
        assert_eq!(percent_encode("itr/1 x~a"), "itr%2F1%20x~a");
        assert_eq!(percent_encode(""), "");
    }

    #[test]
    /// What: An explicit config dir is used as-is and created.
    ///
    /// Inputs:
    /// - Nested path inside a temp dir.
    ///
    /// Output:
    /// - Same path, now existing; logs and settings paths beneath it.
    fn config_dir_override_is_created() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let wanted = tmp.path().join("nested").join("cfg");
        let dir = config_dir(Some(&wanted));
        assert_eq!(dir, wanted);
        assert!(dir.is_dir());
        assert!(logs_dir(&dir).is_dir());
        assert_eq!(settings_path(&dir), wanted.join("settings.conf"));
    }
}
