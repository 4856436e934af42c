//! Central `AppState` container owned by the event loop.

use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use crate::app::controller::ScreenController;
use crate::app::lifecycle::LifecycleHost;
use crate::state::card::{CardDeck, CardState};
use crate::state::inventory::InventoryStore;
use crate::state::modal::Modal;
use crate::state::types::{FetchRequest, FocusEvent, Record};

/// Application state shared by the event, worker-result and UI layers.
///
/// The inventory store is mutated only through its own fetch entry points;
/// everything else here is view state.
#[derive(Debug)]
pub struct AppState {
    /// Fetched inventory and refresh flag.
    pub inventory: InventoryStore,
    /// Expand/collapse state of mounted cards.
    pub cards: CardDeck,
    /// Focus event source for the inventory screen.
    pub host: LifecycleHost,
    /// Decides when to fetch.
    pub controller: ScreenController,
    /// Index into the record list that is highlighted.
    pub selected: usize,
    /// List widget state (selection and scroll offset).
    pub list_state: ListState,
    /// Active modal overlay.
    pub modal: Modal,
    /// Description of the configured record source.
    pub source_label: String,
    /// Shell command that opens the barcode scanner.
    pub scan_command: Option<String>,
    /// Whether the scanner is currently open.
    pub scanner_running: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let mut host = LifecycleHost::default();
        let controller = ScreenController::mount(&mut host);
        Self {
            inventory: InventoryStore::default(),
            cards: CardDeck::default(),
            host,
            controller,
            selected: 0,
            list_state: ListState::default(),
            modal: Modal::None,
            source_label: String::new(),
            scan_command: None,
            scanner_running: false,
        }
    }
}

impl AppState {
    /// Record under the cursor, if any.
    #[must_use]
    pub fn selected_record(&self) -> Option<&Record> {
        self.inventory.records().get(self.selected)
    }

    /// What: Move the cursor by `delta` rows, clamped to the list.
    ///
    /// Inputs:
    /// - `delta`: Signed row offset
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.inventory.records().len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
        self.list_state.select(Some(self.selected));
    }

    /// What: Toggle the card under the cursor.
    ///
    /// Output:
    /// - New state of the toggled card, or `None` when the list is empty
    pub fn toggle_selected(&mut self) -> Option<CardState> {
        let code = self.selected_record()?.code.clone();
        Some(self.cards.toggle(&code))
    }

    /// What: Announce a focus transition and let the controller react.
    ///
    /// Inputs:
    /// - `event`: Focus transition
    /// - `fetch_tx`: Channel to the fetch worker
    /// - `err_tx`: Error sink
    ///
    /// Output:
    /// - Number of fetches the controller issued
    pub fn deliver_focus(
        &mut self,
        event: FocusEvent,
        fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
        err_tx: &mpsc::UnboundedSender<String>,
    ) -> usize {
        self.host.emit(event);
        self.controller
            .pump_focus_events(&mut self.inventory, fetch_tx, err_tx)
    }

    /// What: Bring view state in line with a freshly replaced collection.
    ///
    /// Inputs:
    /// - `prev_selected_code`: Code highlighted before the replacement
    ///
    /// Details:
    /// - Unmounts cards whose records disappeared.
    /// - Keeps the cursor on the same record when it survived, else clamps.
    pub fn sync_with_inventory(&mut self, prev_selected_code: Option<&str>) {
        let records = self.inventory.records();
        let dropped = self
            .cards
            .reconcile(records.iter().map(|r| r.code.as_str()));
        if dropped > 0 {
            tracing::debug!(dropped, "unmounted cards for removed records");
        }
        let new_sel = prev_selected_code
            .and_then(|code| records.iter().position(|r| r.code == code))
            .unwrap_or(self.selected);
        self.selected = new_sel.min(records.len().saturating_sub(1));
        self.list_state.select(if records.is_empty() {
            None
        } else {
            Some(self.selected)
        });
    }
}
