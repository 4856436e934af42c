//! Main `select!` loop dispatching channel messages to handlers.

use ratatui::Terminal;
use tokio::select;

use crate::events::{EventSenders, handle_event};
use crate::state::AppState;
use crate::ui::ui;

use super::channels::Channels;
use super::handlers::{
    handle_error, handle_fetch_response, handle_navigation, handle_scanner_done,
};

/// What: Process one iteration of channel message handling.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels for background workers
///
/// Output: `true` if the event loop should exit, `false` to continue
///
/// Details:
/// - Waits for and processes a single message from any channel
/// - Returns `true` when an event handler indicates exit (e.g., quit command)
pub async fn process_channel_messages(app: &mut AppState, channels: &mut Channels) -> bool {
    select! {
        Some(ev) = channels.event_rx.recv() => {
            let tx = EventSenders {
                fetch_tx: &channels.fetch_tx,
                err_tx: &channels.net_err_tx,
                nav_tx: &channels.nav_tx,
            };
            handle_event(ev, app, &tx)
        }
        Some(response) = channels.fetch_res_rx.recv() => {
            let id = response.id;
            let outcome = handle_fetch_response(app, response, &channels.net_err_tx);
            tracing::debug!(id, ?outcome, "fetch response handled");
            false
        }
        Some(msg) = channels.net_err_rx.recv() => {
            handle_error(app, msg);
            false
        }
        Some(nav) = channels.nav_rx.recv() => {
            handle_navigation(
                app,
                nav,
                &channels.fetch_tx,
                &channels.net_err_tx,
                &channels.scanner_done_tx,
            );
            false
        }
        Some(outcome) = channels.scanner_done_rx.recv() => {
            handle_scanner_done(app, outcome, &channels.fetch_tx, &channels.net_err_tx);
            false
        }
        Some(()) = channels.tick_rx.recv() => false,
        else => false
    }
}

/// What: Run the main event loop, processing all channel messages and rendering the UI.
///
/// Inputs:
/// - `terminal`: Optional terminal for rendering (None in headless mode)
/// - `app`: Application state
/// - `channels`: Communication channels for background workers
///
/// Details:
/// - Redraws before every wait so each handled message is reflected on screen
/// - Exits when the event handler returns `true`
pub async fn run_event_loop(
    terminal: &mut Option<Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>>,
    app: &mut AppState,
    channels: &mut Channels,
) {
    loop {
        if let Some(t) = terminal.as_mut()
            && let Err(e) = t.draw(|f| ui(f, app))
        {
            tracing::warn!(error = %e, "frame draw failed");
        }

        if process_channel_messages(app, channels).await {
            break;
        }
    }
}
