use ratatui::{
    Frame,
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::state::Modal;
use crate::theme::Theme;

use super::helpers::{centered_rect, wrap_text_to_lines};

/// Key bindings listed in the help overlay.
const HELP_ROWS: &[(&str, &str)] = &[
    ("↑/k  ↓/j", "Move between cards"),
    ("PgUp/PgDn", "Move by a page"),
    ("Home/End", "First / last card"),
    ("Enter/Space", "Expand or collapse the card"),
    ("r/F5", "Refresh (or scroll up at the top)"),
    ("s", "Open the barcode scanner"),
    ("?", "This help"),
    ("q/Esc", "Quit"),
];

/// What: Render the active modal overlay, if any.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `modal`: Active modal
/// - `area`: Full available area
/// - `th`: Active palette
pub fn render_modal(f: &mut Frame, modal: &Modal, area: Rect, th: &Theme) {
    match modal {
        Modal::None => {}
        Modal::Alert { message } => render_alert(f, message, area, th),
        Modal::Help => render_help(f, area, th),
    }
}

/// What: Render an error alert box.
///
/// Details:
/// - The box grows with the wrapped message up to the screen height
fn render_alert(f: &mut Frame, message: &str, area: Rect, th: &Theme) {
    let w = area.width.saturating_sub(10).min(70);
    let body = wrap_text_to_lines(message, usize::from(w.saturating_sub(4)));
    let h = u16::try_from(body.len()).unwrap_or(u16::MAX).saturating_add(6);
    let rect = centered_rect(area, w, h);
    f.render_widget(Clear, rect);

    let mut lines = vec![
        Line::from(Span::styled(
            "Something went wrong",
            Style::default().fg(th.red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        body.into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(th.text)))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter or Esc to close",
        Style::default().fg(th.overlay1),
    )));

    let boxw = Paragraph::new(lines)
        .style(Style::default().fg(th.text).bg(th.base))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(" Error ", Style::default().fg(th.red)))
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(th.red))
                .style(Style::default().bg(th.base)),
        );
    f.render_widget(boxw, rect);
}

/// Render the key binding overlay.
fn render_help(f: &mut Frame, area: Rect, th: &Theme) {
    let h = u16::try_from(HELP_ROWS.len()).unwrap_or(u16::MAX).saturating_add(4);
    let rect = centered_rect(area, 56, h);
    f.render_widget(Clear, rect);
    let mut lines: Vec<Line<'static>> = HELP_ROWS
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!("{keys:<14}"),
                    Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*what, Style::default().fg(th.text)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Cards posted within the last 7 days carry [NEW].",
        Style::default().fg(th.overlay1),
    )));
    let boxw = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Keys ", Style::default().fg(th.overlay1)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.lavender))
            .style(Style::default().bg(th.base)),
    );
    f.render_widget(boxw, rect);
}
