//! Handlers for messages arriving on the runtime channels.

use tokio::sync::mpsc;

use crate::state::{
    AppState, FetchOutcome, FetchRequest, FetchResponse, FocusEvent, Modal, Navigation,
};

use super::workers::scanner::spawn_scanner;

/// What: Handle a fetch response from the worker.
///
/// Inputs:
/// - `app`: Application state
/// - `response`: Worker response tagged with its request id
/// - `err_tx`: Error sink for failures
///
/// Output:
/// - What the store did with the response
///
/// Details:
/// - Stale responses are dropped by the store
/// - After a replacement, unmounts cards of vanished records and keeps the
///   cursor on the previously selected record
pub fn handle_fetch_response(
    app: &mut AppState,
    response: FetchResponse,
    err_tx: &mpsc::UnboundedSender<String>,
) -> FetchOutcome {
    let prev_selected = app.selected_record().map(|r| r.code.clone());
    let outcome = app.inventory.apply_response(response, err_tx);
    if matches!(outcome, FetchOutcome::Replaced { .. }) {
        app.sync_with_inventory(prev_selected.as_deref());
    }
    outcome
}

/// What: Surface an error message to the user.
///
/// Inputs:
/// - `app`: Application state
/// - `message`: Failure text from the error sink
///
/// Details:
/// - Shows the message in an alert; an open alert is replaced by the newest one
pub fn handle_error(app: &mut AppState, message: String) {
    tracing::error!(error = %message, "reported to user");
    app.modal = Modal::Alert { message };
}

/// What: Handle a navigation request from the screen controller.
///
/// Inputs:
/// - `app`: Application state
/// - `nav`: Requested destination
/// - `fetch_tx`: Channel to the fetch worker
/// - `err_tx`: Error sink
/// - `scanner_done_tx`: Channel receiving the scanner's exit outcome
///
/// Details:
/// - Opening the scanner blurs the inventory screen; it refocuses (and
///   refreshes) when the scanner exits
/// - Without a configured `scan_command` an alert explains how to set one
/// - A second request while the scanner is open is ignored
pub fn handle_navigation(
    app: &mut AppState,
    nav: Navigation,
    fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
    err_tx: &mpsc::UnboundedSender<String>,
    scanner_done_tx: &mpsc::UnboundedSender<Result<(), String>>,
) {
    match nav {
        Navigation::Scanner => {
            if app.scanner_running {
                tracing::debug!("scanner already open; ignoring request");
                return;
            }
            let Some(command) = app.scan_command.clone() else {
                app.modal = Modal::Alert {
                    message: "No scanner configured. Set scan_command in settings.conf or pass \
                              --scan-command."
                        .to_string(),
                };
                return;
            };
            tracing::info!(command = %command, "opening scanner");
            app.scanner_running = true;
            app.deliver_focus(FocusEvent::Blurred, fetch_tx, err_tx);
            spawn_scanner(command, scanner_done_tx.clone());
        }
    }
}

/// What: Handle the scanner closing.
///
/// Inputs:
/// - `app`: Application state
/// - `outcome`: Scanner exit outcome
/// - `fetch_tx`: Channel to the fetch worker
/// - `err_tx`: Error sink
///
/// Details:
/// - Returns focus to the inventory screen, which triggers a refresh so a
///   freshly scanned product shows up
/// - A scanner failure is forwarded to the error sink
pub fn handle_scanner_done(
    app: &mut AppState,
    outcome: Result<(), String>,
    fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
    err_tx: &mpsc::UnboundedSender<String>,
) {
    app.scanner_running = false;
    if let Err(msg) = outcome {
        let _ = err_tx.send(msg);
    }
    app.deliver_focus(FocusEvent::Focused, fetch_tx, err_tx);
}
