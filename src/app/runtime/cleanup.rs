//! Shutdown path run when the event loop exits.

use std::sync::atomic::Ordering;

use crate::state::AppState;

use super::channels::Channels;

/// What: Tear down the inventory screen and stop background input on exit.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels
///
/// Details:
/// - Unsubscribes the screen controller so late focus events are ignored
/// - Signals the event reading thread to exit
/// - In-flight fetches are not cancelled; their responses are dropped with
///   the receivers
pub fn cleanup_on_exit(app: &mut AppState, channels: &Channels) {
    app.controller.teardown();
    channels.event_thread_cancelled.store(true, Ordering::Relaxed);
    tracing::debug!(
        records = app.inventory.records().len(),
        pending = app.inventory.is_fetching(),
        "inventory screen torn down"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Cleanup unmounts the controller and cancels the input thread.
    ///
    /// Inputs:
    /// - Default app state and channels.
    ///
    /// Output:
    /// - Controller unmounted; host has no live subscribers; flag set.
    fn cleanup_unmounts_and_cancels() {
        let mut app = AppState::default();
        let channels = Channels::new();
        cleanup_on_exit(&mut app, &channels);
        assert!(!app.controller.is_mounted());
        assert_eq!(app.host.subscriber_count(), 0);
        assert!(channels.event_thread_cancelled.load(Ordering::Relaxed));
    }
}
