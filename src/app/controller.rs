//! Decides when the inventory screen fetches.
//!
//! Two triggers lead to [`InventoryStore::fetch_inventory`]: the screen gaining
//! focus (once per transition) and an explicit pull-to-refresh. There is no
//! debouncing; every trigger issues its own fetch.

use tokio::sync::mpsc;

use crate::app::lifecycle::{FocusSubscription, LifecycleHost};
use crate::state::{FetchRequest, FocusEvent, InventoryStore, Navigation};

/// Fetch trigger logic for the inventory screen.
#[derive(Debug)]
pub struct ScreenController {
    /// Focus listener; `None` after teardown.
    subscription: Option<FocusSubscription>,
    /// Whether the screen is currently the active view.
    focused: bool,
}

impl ScreenController {
    /// What: Attach a controller to the lifecycle host.
    ///
    /// Inputs:
    /// - `host`: Source of focus events
    ///
    /// Output:
    /// - Controller subscribed to focus events, starting unfocused
    pub fn mount(host: &mut LifecycleHost) -> Self {
        Self {
            subscription: Some(host.subscribe()),
            focused: false,
        }
    }

    /// Unsubscribe from focus events. Later focus events are not seen.
    pub fn teardown(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.unsubscribe();
            tracing::debug!("screen controller unsubscribed from focus events");
        }
    }

    /// Whether the controller still listens for focus events.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Whether the screen is the active view.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// What: React to one focus event.
    ///
    /// Inputs:
    /// - `event`: Focus transition from the host
    /// - `store`: Inventory store to refresh
    /// - `fetch_tx`: Channel to the fetch worker
    /// - `err_tx`: Error sink
    ///
    /// Output:
    /// - `true` when a fetch was issued
    ///
    /// Details:
    /// - Only an unfocused → focused transition fetches; a repeated `Focused`
    ///   without a `Blurred` in between is ignored.
    pub fn on_focus_event(
        &mut self,
        event: FocusEvent,
        store: &mut InventoryStore,
        fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
        err_tx: &mpsc::UnboundedSender<String>,
    ) -> bool {
        match event {
            FocusEvent::Focused if !self.focused => {
                self.focused = true;
                tracing::info!("inventory screen focused; refreshing");
                store.fetch_inventory(fetch_tx, err_tx);
                true
            }
            FocusEvent::Focused => false,
            FocusEvent::Blurred => {
                self.focused = false;
                false
            }
        }
    }

    /// What: Drain queued focus events from the subscription.
    ///
    /// Inputs:
    /// - `store`, `fetch_tx`, `err_tx`: As for [`Self::on_focus_event`]
    ///
    /// Output:
    /// - Number of fetches issued
    ///
    /// Details:
    /// - Runs synchronously after the host emits, so each focus reaction
    ///   completes before the next input is handled.
    pub fn pump_focus_events(
        &mut self,
        store: &mut InventoryStore,
        fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
        err_tx: &mpsc::UnboundedSender<String>,
    ) -> usize {
        let mut issued = 0;
        while let Some(event) = self.subscription.as_mut().and_then(FocusSubscription::try_next) {
            if self.on_focus_event(event, store, fetch_tx, err_tx) {
                issued += 1;
            }
        }
        issued
    }

    /// What: Handle the pull-to-refresh gesture.
    ///
    /// Inputs:
    /// - `store`, `fetch_tx`, `err_tx`: As for [`Self::on_focus_event`]
    ///
    /// Details:
    /// - Fetches regardless of focus state.
    pub fn pull_to_refresh(
        &self,
        store: &mut InventoryStore,
        fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
        err_tx: &mpsc::UnboundedSender<String>,
    ) {
        tracing::info!("pull-to-refresh");
        store.fetch_inventory(fetch_tx, err_tx);
    }

    /// What: Ask the host to open the barcode scanner.
    ///
    /// Inputs:
    /// - `nav_tx`: Navigation channel to the host
    ///
    /// Details:
    /// - Sends exactly one request per call.
    pub fn request_scan(&self, nav_tx: &mpsc::UnboundedSender<Navigation>) {
        if nav_tx.send(Navigation::Scanner).is_err() {
            tracing::warn!("navigation host gone; scan request dropped");
        }
    }
}

impl Drop for ScreenController {
    fn drop(&mut self) {
        self.teardown();
    }
}
