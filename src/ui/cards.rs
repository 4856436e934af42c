//! Rendering of a single inventory card as a multi-line list item.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};
use unicode_width::UnicodeWidthStr;

use crate::logic::CardView;
use crate::state::CardState;
use crate::theme::Theme;

use super::helpers::{truncate_to_width, wrap_text_to_lines};

/// Glyph standing in for a product image.
const IMAGE_GLYPH: &str = "▣ ";
/// Glyph shown when the record has no image.
const NO_IMAGE_GLYPH: &str = "□ ";
/// Badge marking a recently posted product.
const NEW_BADGE: &str = " [NEW]";
/// Indent for detail lines below the name.
const INDENT: &str = "  ";

/// What: Build the display lines for one card.
///
/// Inputs:
/// - `view`: Display fields for the record
/// - `state`: Expand/collapse state of the card
/// - `width`: Columns available inside the list
/// - `th`: Active palette
///
/// Output:
/// - Lines of the card, ending with a blank separator
///
/// Details:
/// - Collapsed: the name is cut to one line with an ellipsis; tags are hidden
/// - Expanded: the name wraps over as many lines as it needs, followed by the
///   image reference and one chip per category token
/// - The `[NEW]` badge sits after the name's first line in both states
pub fn card_lines(
    view: &CardView,
    state: CardState,
    width: usize,
    th: &Theme,
) -> Vec<Line<'static>> {
    let glyph = if view.image_uri.is_some() {
        IMAGE_GLYPH
    } else {
        NO_IMAGE_GLYPH
    };
    let badge = if view.is_new { NEW_BADGE } else { "" };
    let name_width = width
        .saturating_sub(glyph.width())
        .saturating_sub(badge.width())
        .max(1);
    let name_style = Style::default().fg(th.text).add_modifier(Modifier::BOLD);

    let name_lines = match state.name_line_limit() {
        Some(_) => vec![truncate_to_width(&view.name, name_width)],
        None => wrap_text_to_lines(&view.name, name_width),
    };

    let mut lines = Vec::with_capacity(name_lines.len() + 4);
    for (i, text) in name_lines.into_iter().enumerate() {
        let mut spans = Vec::with_capacity(3);
        if i == 0 {
            spans.push(Span::styled(glyph, Style::default().fg(th.overlay1)));
        } else {
            spans.push(Span::raw(" ".repeat(glyph.width())));
        }
        spans.push(Span::styled(text, name_style));
        if i == 0 && view.is_new {
            spans.push(Span::styled(
                NEW_BADGE,
                Style::default().fg(th.green).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled(view.code.clone(), Style::default().fg(th.subtext0)),
        Span::styled("  ·  ", Style::default().fg(th.overlay1)),
        Span::styled(view.date.clone(), Style::default().fg(th.subtext0)),
    ]));

    if state.is_expanded() {
        if let Some(uri) = &view.image_uri {
            let avail = width.saturating_sub(INDENT.width() + "image: ".width());
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled("image: ", Style::default().fg(th.overlay1)),
                Span::styled(truncate_to_width(uri, avail), Style::default().fg(th.sapphire)),
            ]));
        }
        if state.shows_tags(view.categories.as_deref()) {
            lines.extend(tag_lines(view.categories.as_deref().unwrap_or_default(), width, th));
        }
    }

    lines.push(Line::from(""));
    lines
}

/// What: Lay out category chips, wrapping to further lines as needed.
///
/// Inputs:
/// - `tags`: Category tokens; an empty token still gets its own `[]` chip
/// - `width`: Columns available
/// - `th`: Active palette
///
/// Output:
/// - Lines of chips, one chip per token in order
fn tag_lines(tags: &[String], width: usize, th: &Theme) -> Vec<Line<'static>> {
    let chip_style = Style::default().fg(th.mauve);
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = vec![Span::raw(INDENT)];
    let mut used = INDENT.width();
    for tag in tags {
        let chip = format!("[{tag}]");
        let chip_width = chip.width() + 1;
        if used + chip_width > width && spans.len() > 1 {
            lines.push(Line::from(std::mem::replace(
                &mut spans,
                vec![Span::raw(INDENT)],
            )));
            used = INDENT.width();
        }
        spans.push(Span::styled(chip, chip_style));
        spans.push(Span::raw(" "));
        used += chip_width;
    }
    if spans.len() > 1 {
        lines.push(Line::from(spans));
    }
    lines
}

/// Wrap card lines into a list item.
pub fn card_item(
    view: &CardView,
    state: CardState,
    width: usize,
    th: &Theme,
) -> ListItem<'static> {
    ListItem::new(card_lines(view, state, width, th))
}
