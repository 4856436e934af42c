//! Text measuring and layout helpers shared by the UI renderers.

use chrono::{DateTime, Utc};
use ratatui::prelude::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker appended to text cut off by [`truncate_to_width`].
pub const ELLIPSIS: char = '…';

/// What: Cut text to a display width, marking the cut with an ellipsis.
///
/// Inputs:
/// - `text`: Text to fit
/// - `max_width`: Available display columns
///
/// Output:
/// - `text` unchanged when it fits; otherwise its longest prefix that fits
///   together with a trailing `…`
///
/// Details:
/// - Measures Unicode display width, so wide glyphs count as two columns
/// - Newlines are flattened to spaces first
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.width() <= max_width {
        return flat;
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0usize;
    for ch in flat.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// What: Wrap text to multiple lines based on available width.
///
/// Inputs:
/// - `content`: Text content to wrap
/// - `available_width`: Width available for wrapping
///
/// Output:
/// - Vector of strings, each representing a wrapped line
///
/// Details:
/// - Uses Unicode display width for accurate measurement
/// - Wraps at word boundaries; a single word wider than the line is hard-cut
/// - Returns at least one empty line if content is empty
pub fn wrap_text_to_lines(content: &str, available_width: usize) -> Vec<String> {
    let width = available_width.max(1);
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0usize;

    for word in content.split_whitespace() {
        let word_width = word.width();
        let separator_width = usize::from(current_width > 0);
        if current_width > 0 && current_width + separator_width + word_width > width {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }
        if word_width > width {
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if current_width + w > width && current_width > 0 {
                    lines.push(std::mem::take(&mut current_line));
                    current_width = 0;
                }
                current_line.push(ch);
                current_width += w;
            }
            continue;
        }
        if current_width > 0 {
            current_line.push(' ');
            current_width += 1;
        }
        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() || lines.is_empty() {
        lines.push(current_line);
    }
    lines
}

/// What: Describe how long ago the list was last replaced.
///
/// Inputs:
/// - `synced`: Time of the last successful fetch
/// - `now`: Current time
///
/// Output:
/// - `"just now"`, `"Nm ago"`, `"Nh ago"` or `"Nd ago"`
pub fn format_sync_age(synced: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(synced).num_seconds().max(0);
    match secs {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", secs / 60),
        3600..86_400 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

/// What: Rectangle of the given size centered inside `area`.
///
/// Inputs:
/// - `area`: Outer rectangle
/// - `width`, `height`: Desired size, clamped to `area`
///
/// Output:
/// - Centered rectangle
pub const fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = if width < area.width { width } else { area.width };
    let h = if height < area.height { height } else { area.height };
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
