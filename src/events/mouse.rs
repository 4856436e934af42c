use crossterm::event::{MouseEvent, MouseEventKind};

use super::EventSenders;
use crate::state::AppState;

/// What: Handle mouse wheel input on the card list.
///
/// Inputs:
/// - `me`: Mouse event
/// - `app`: Application state
/// - `tx`: Channel senders
///
/// Details:
/// - Scrolling up while already at the top of the list is the pull-to-refresh
///   gesture
/// - Other mouse events are ignored
pub(super) fn handle_mouse(me: MouseEvent, app: &mut AppState, tx: &EventSenders<'_>) {
    if app.modal.is_open() {
        return;
    }
    match me.kind {
        MouseEventKind::ScrollDown => app.move_selection(1),
        MouseEventKind::ScrollUp if app.selected == 0 => {
            tracing::debug!("pulled past the top of the list");
            app.controller
                .pull_to_refresh(&mut app.inventory, tx.fetch_tx, tx.err_tx);
        }
        MouseEventKind::ScrollUp => app.move_selection(-1),
        _ => {}
    }
}
