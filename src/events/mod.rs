//! Event handling layer for the inventory screen.
//!
//! Keys, mouse scrolling and terminal focus changes are turned into card
//! toggles, cursor moves and controller triggers.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::state::{AppState, FetchRequest, FocusEvent, Modal, Navigation};

mod mouse;

/// Rows moved by PageUp/PageDown.
const PAGE_STEP: isize = 5;

/// Senders the event layer may use.
pub struct EventSenders<'a> {
    /// Channel to the fetch worker.
    pub fetch_tx: &'a mpsc::UnboundedSender<FetchRequest>,
    /// Error sink.
    pub err_tx: &'a mpsc::UnboundedSender<String>,
    /// Navigation requests to the host.
    pub nav_tx: &'a mpsc::UnboundedSender<Navigation>,
}

/// Dispatch a single terminal event and mutate the [`AppState`].
///
/// Returns `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(ev: CEvent, app: &mut AppState, tx: &EventSenders<'_>) -> bool {
    match ev {
        CEvent::Key(ke) if ke.kind == KeyEventKind::Press => handle_key(ke, app, tx),
        CEvent::Mouse(me) => {
            mouse::handle_mouse(me, app, tx);
            false
        }
        CEvent::FocusGained => {
            app.deliver_focus(FocusEvent::Focused, tx.fetch_tx, tx.err_tx);
            false
        }
        CEvent::FocusLost => {
            app.deliver_focus(FocusEvent::Blurred, tx.fetch_tx, tx.err_tx);
            false
        }
        _ => false,
    }
}

/// What: Handle one key press.
///
/// Inputs:
/// - `ke`: Key event
/// - `app`: Application state
/// - `tx`: Channel senders
///
/// Output:
/// - `true` when the application should exit
///
/// Details:
/// - While a modal is open, Esc/Enter/q close it and other keys are swallowed
fn handle_key(ke: KeyEvent, app: &mut AppState, tx: &EventSenders<'_>) -> bool {
    if ke.modifiers.contains(KeyModifiers::CONTROL) && ke.code == KeyCode::Char('c') {
        return true;
    }
    if app.modal.is_open() {
        if matches!(ke.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.modal = Modal::None;
        }
        return false;
    }
    match ke.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-PAGE_STEP),
        KeyCode::PageDown => app.move_selection(PAGE_STEP),
        KeyCode::Home | KeyCode::Char('g') => app.move_selection(isize::MIN),
        KeyCode::End | KeyCode::Char('G') => app.move_selection(isize::MAX),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(state) = app.toggle_selected() {
                tracing::trace!(?state, "card toggled");
            }
        }
        KeyCode::Char('r') | KeyCode::F(5) => {
            app.controller
                .pull_to_refresh(&mut app.inventory, tx.fetch_tx, tx.err_tx);
        }
        KeyCode::Char('s') => app.controller.request_scan(tx.nav_tx),
        KeyCode::Char('?') => app.modal = Modal::Help,
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CardState, FetchResponse, Record};
    use chrono::Utc;
    use crossterm::event::KeyEventState;

    struct Rig {
        fetch_tx: mpsc::UnboundedSender<FetchRequest>,
        fetch_rx: mpsc::UnboundedReceiver<FetchRequest>,
        err_tx: mpsc::UnboundedSender<String>,
        nav_tx: mpsc::UnboundedSender<Navigation>,
        nav_rx: mpsc::UnboundedReceiver<Navigation>,
    }

    impl Rig {
        fn new() -> Self {
            let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
            let (err_tx, _) = mpsc::unbounded_channel();
            let (nav_tx, nav_rx) = mpsc::unbounded_channel();
            Self {
                fetch_tx,
                fetch_rx,
                err_tx,
                nav_tx,
                nav_rx,
            }
        }

        fn senders(&self) -> EventSenders<'_> {
            EventSenders {
                fetch_tx: &self.fetch_tx,
                err_tx: &self.err_tx,
                nav_tx: &self.nav_tx,
            }
        }
    }

    fn key(code: KeyCode) -> CEvent {
        CEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        })
    }

    fn loaded_app(rig: &Rig, codes: &[&str]) -> AppState {
        let mut app = AppState::default();
        let id = app.inventory.fetch_inventory(&rig.fetch_tx, &rig.err_tx);
        let records = codes
            .iter()
            .map(|c| Record {
                code: (*c).to_string(),
                posted_at: Utc::now().fixed_offset(),
                name: (*c).to_string(),
                image_uri: None,
                categories_raw: None,
            })
            .collect();
        app.inventory.apply_response(
            FetchResponse {
                id,
                result: Ok(records),
            },
            &rig.err_tx,
        );
        app.sync_with_inventory(None);
        app
    }

    #[test]
    /// What: Enter toggles the highlighted card only.
    ///
    /// Inputs:
    /// - Two cards; Down then Enter.
    ///
    /// Output:
    /// - Second card expanded, first collapsed.
    fn enter_toggles_selected_card() {
        let mut rig = Rig::new();
        let mut app = loaded_app(&rig, &["A", "B"]);
        while rig.fetch_rx.try_recv().is_ok() {}
        assert!(!handle_event(key(KeyCode::Down), &mut app, &rig.senders()));
        assert!(!handle_event(key(KeyCode::Enter), &mut app, &rig.senders()));
        assert_eq!(app.cards.state("B"), CardState::Expanded);
        assert_eq!(app.cards.state("A"), CardState::Collapsed);
    }

    #[test]
    /// What: `r` issues a refresh and `s` a single scan request.
    ///
    /// Inputs:
    /// - Key presses `r` and `s`.
    ///
    /// Output:
    /// - One fetch request and one navigation request.
    fn refresh_and_scan_keys() {
        let mut rig = Rig::new();
        let mut app = AppState::default();
        handle_event(key(KeyCode::Char('r')), &mut app, &rig.senders());
        handle_event(key(KeyCode::Char('s')), &mut app, &rig.senders());
        assert!(rig.fetch_rx.try_recv().is_ok());
        assert!(rig.fetch_rx.try_recv().is_err());
        assert_eq!(rig.nav_rx.try_recv().ok(), Some(Navigation::Scanner));
        assert!(rig.nav_rx.try_recv().is_err());
    }

    #[test]
    /// What: Terminal focus changes drive focus-triggered refreshes.
    ///
    /// Inputs:
    /// - `FocusGained`, `FocusGained`, `FocusLost`, `FocusGained`.
    ///
    /// Output:
    /// - Two fetch requests in total.
    fn terminal_focus_triggers_refresh() {
        let mut rig = Rig::new();
        let mut app = AppState::default();
        for ev in [
            CEvent::FocusGained,
            CEvent::FocusGained,
            CEvent::FocusLost,
            CEvent::FocusGained,
        ] {
            handle_event(ev, &mut app, &rig.senders());
        }
        let mut n = 0;
        while rig.fetch_rx.try_recv().is_ok() {
            n += 1;
        }
        assert_eq!(n, 2);
    }

    #[test]
    /// What: An open modal swallows keys until closed.
    ///
    /// Inputs:
    /// - Alert open; press `r`, then Esc, then `q`.
    ///
    /// Output:
    /// - No fetch while open; Esc closes; `q` then exits.
    fn modal_captures_keys() {
        let mut rig = Rig::new();
        let mut app = AppState {
            modal: Modal::Alert {
                message: "x".into(),
            },
            ..AppState::default()
        };
        assert!(!handle_event(key(KeyCode::Char('r')), &mut app, &rig.senders()));
        assert!(rig.fetch_rx.try_recv().is_err());
        assert!(!handle_event(key(KeyCode::Esc), &mut app, &rig.senders()));
        assert_eq!(app.modal, Modal::None);
        assert!(handle_event(key(KeyCode::Char('q')), &mut app, &rig.senders()));
    }
}
