//! Focus lifecycle of the inventory screen.
//!
//! The host fans [`FocusEvent`]s out to subscribers. A [`FocusSubscription`]
//! stops receiving when it is unsubscribed or dropped; the host prunes closed
//! subscribers on its next emit.

use tokio::sync::mpsc;

use crate::state::FocusEvent;

/// Source of focus transitions for the inventory screen.
#[derive(Debug, Default)]
pub struct LifecycleHost {
    /// Open subscriber channels.
    subscribers: Vec<mpsc::UnboundedSender<FocusEvent>>,
}

impl LifecycleHost {
    /// Register a new focus listener.
    pub fn subscribe(&mut self) -> FocusSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        FocusSubscription { rx }
    }

    /// What: Deliver a focus event to every live subscriber.
    ///
    /// Inputs:
    /// - `event`: Transition to announce
    ///
    /// Output:
    /// - Number of subscribers that received the event
    ///
    /// Details:
    /// - Subscribers that have gone away are removed.
    pub fn emit(&mut self, event: FocusEvent) -> usize {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
        tracing::trace!(?event, subscribers = self.subscribers.len(), "focus event");
        self.subscribers.len()
    }

    /// Number of subscribers still registered (pruned lazily on emit).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }
}

/// Handle to a stream of focus events.
#[derive(Debug)]
pub struct FocusSubscription {
    /// Receiving half; closing it ends the subscription.
    rx: mpsc::UnboundedReceiver<FocusEvent>,
}

impl FocusSubscription {
    /// Next queued event, without waiting.
    pub fn try_next(&mut self) -> Option<FocusEvent> {
        self.rx.try_recv().ok()
    }

    /// End the subscription; the host stops delivering to it.
    pub fn unsubscribe(mut self) {
        self.rx.close();
    }
}
