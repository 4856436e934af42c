//! Background threads feeding terminal input and ticks into the event loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::Event as CEvent;
use tokio::{sync::mpsc, time::Duration};

/// Redraw interval so relative state (the `[NEW]` badge, sync age) stays current.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What: Spawn the blocking terminal input thread.
///
/// Inputs:
/// - `headless`: When `true`, no thread is started
/// - `event_tx`: Channel receiving terminal events
/// - `event_thread_cancelled`: Set on exit to stop the thread
///
/// Details:
/// - Polls crossterm every 50ms so the cancellation flag is observed promptly
/// - Stops when the event loop drops its receiver
pub fn spawn_event_thread(
    headless: bool,
    event_tx: mpsc::UnboundedSender<CEvent>,
    event_thread_cancelled: Arc<AtomicBool>,
) {
    if headless {
        return;
    }
    std::thread::spawn(move || {
        while !event_thread_cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(std::time::Duration::from_millis(50)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if event_thread_cancelled.load(Ordering::Relaxed)
                            || event_tx.send(ev).is_err()
                        {
                            break;
                        }
                    }
                    Err(e) => tracing::debug!(error = %e, "transient terminal read error"),
                },
                Ok(false) => {}
                Err(e) => tracing::debug!(error = %e, "terminal poll error"),
            }
        }
        tracing::debug!("event thread stopped");
    });
}

/// What: Spawn the periodic redraw ticker.
///
/// Inputs:
/// - `tick_tx`: Channel receiving one `()` per tick
///
/// Details:
/// - Stops when the event loop drops its receiver
pub fn spawn_tick_worker(tick_tx: mpsc::UnboundedSender<()>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            if tick_tx.send(()).is_err() {
                break;
            }
        }
    });
}
