//! Channel bundle connecting the event loop to its workers.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::state::{FetchRequest, FetchResponse, Navigation};

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - Contains all channel senders and receivers used for communication
///   between the main event loop and background workers
/// - Request receivers (`fetch_rx`) are taken out when the workers spawn
pub struct Channels {
    /// Terminal events from the input thread.
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Terminal events consumed by the event loop.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Set on exit to stop the input thread.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Fetch requests issued by the inventory store.
    pub fetch_tx: mpsc::UnboundedSender<FetchRequest>,
    /// Fetch requests consumed by the fetch worker.
    pub fetch_rx: Option<mpsc::UnboundedReceiver<FetchRequest>>,
    /// Fetch responses produced by the fetch worker.
    pub fetch_res_tx: mpsc::UnboundedSender<FetchResponse>,
    /// Fetch responses consumed by the event loop.
    pub fetch_res_rx: mpsc::UnboundedReceiver<FetchResponse>,
    /// Error sink for user-visible failures.
    pub net_err_tx: mpsc::UnboundedSender<String>,
    /// Errors consumed by the event loop.
    pub net_err_rx: mpsc::UnboundedReceiver<String>,
    /// Navigation requests from the screen controller.
    pub nav_tx: mpsc::UnboundedSender<Navigation>,
    /// Navigation requests consumed by the event loop.
    pub nav_rx: mpsc::UnboundedReceiver<Navigation>,
    /// Scanner exit notifications.
    pub scanner_done_tx: mpsc::UnboundedSender<Result<(), String>>,
    /// Scanner exit notifications consumed by the event loop.
    pub scanner_done_rx: mpsc::UnboundedReceiver<Result<(), String>>,
    /// Redraw ticks.
    pub tick_tx: mpsc::UnboundedSender<()>,
    /// Redraw ticks consumed by the event loop.
    pub tick_rx: mpsc::UnboundedReceiver<()>,
}

impl Channels {
    /// What: Create all channels used for runtime communication.
    ///
    /// Output:
    /// - Returns a `Channels` struct with all senders and receivers initialized
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();
        let event_thread_cancelled = Arc::new(AtomicBool::new(false));
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel::<FetchRequest>();
        let (fetch_res_tx, fetch_res_rx) = mpsc::unbounded_channel::<FetchResponse>();
        let (net_err_tx, net_err_rx) = mpsc::unbounded_channel::<String>();
        let (nav_tx, nav_rx) = mpsc::unbounded_channel::<Navigation>();
        let (scanner_done_tx, scanner_done_rx) = mpsc::unbounded_channel::<Result<(), String>>();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel::<()>();
        Self {
            event_tx,
            event_rx,
            event_thread_cancelled,
            fetch_tx,
            fetch_rx: Some(fetch_rx),
            fetch_res_tx,
            fetch_res_rx,
            net_err_tx,
            net_err_rx,
            nav_tx,
            nav_rx,
            scanner_done_tx,
            scanner_done_rx,
            tick_tx,
            tick_rx,
        }
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}
