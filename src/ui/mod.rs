//! Terminal rendering of the inventory screen.
//!
//! Layout, top to bottom: a status line, the card list, and a key hint
//! footer. Modals draw on top.

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::logic::CardView;
use crate::state::AppState;
use crate::theme::{Theme, theme};

mod cards;
pub mod helpers;
mod modals;

use helpers::{format_sync_age, truncate_to_width};

/// Columns taken by list borders and the highlight symbol.
const LIST_CHROME: u16 = 4;

/// What: Render one frame of the inventory screen.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Application state; the list widget state is updated for scrolling
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_status(f, app, chunks[0], &th);
    render_cards(f, app, chunks[1], &th);
    render_footer(f, chunks[2], &th);
    modals::render_modal(f, &app.modal, area, &th);
}

/// What: Render the status line above the list.
///
/// Details:
/// - Shows the refreshing indicator while a fetch is outstanding, otherwise
///   the age of the last successful sync and the last failure, if any
fn render_status(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let mut spans = vec![Span::styled(
        " Inventory ",
        Style::default().fg(th.crust).bg(th.lavender).add_modifier(Modifier::BOLD),
    )];
    if app.inventory.is_fetching() {
        spans.push(Span::styled("  ⟳ Refreshing…", Style::default().fg(th.yellow)));
    } else if let Some(synced) = app.inventory.last_synced() {
        spans.push(Span::styled(
            format!("  synced {}", format_sync_age(synced, Utc::now())),
            Style::default().fg(th.green),
        ));
    }
    if let Some(err) = app.inventory.last_error() {
        spans.push(Span::styled(
            format!("  ✗ {}", truncate_to_width(err, 40)),
            Style::default().fg(th.red),
        ));
    }
    if app.scanner_running {
        spans.push(Span::styled("  scanner open", Style::default().fg(th.sapphire)));
    }
    if !app.source_label.is_empty() {
        spans.push(Span::styled(
            format!("  {}", app.source_label),
            Style::default().fg(th.overlay1),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the card list.
fn render_cards(f: &mut Frame, app: &mut AppState, area: Rect, th: &Theme) {
    let now = Utc::now();
    let width = usize::from(area.width.saturating_sub(LIST_CHROME));
    let records = app.inventory.records();
    let items: Vec<ListItem> = records
        .iter()
        .map(|r| {
            let view = CardView::from_record(r, now);
            cards::card_item(&view, app.cards.state(&r.code), width, th)
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(
            format!(" Products ({}) ", records.len()),
            Style::default().fg(th.overlay1),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.surface2));

    if items.is_empty() {
        let msg = if app.inventory.is_fetching() {
            "Loading inventory…"
        } else {
            "No products yet. Press s to scan one or r to refresh."
        };
        let p = Paragraph::new(Line::from(Span::styled(
            msg,
            Style::default().fg(th.overlay1),
        )))
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let list = List::new(items)
        .style(Style::default().fg(th.text).bg(th.base))
        .block(block)
        .highlight_style(Style::default().bg(th.crust))
        .highlight_symbol("▌ ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the key hint footer.
fn render_footer(f: &mut Frame, area: Rect, th: &Theme) {
    let hints = [
        ("↑↓", "move"),
        ("Enter", "expand"),
        ("r", "refresh"),
        ("s", "scan"),
        ("?", "help"),
        ("q", "quit"),
    ];
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, what) in hints {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {what} "), Style::default().fg(th.overlay1)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
