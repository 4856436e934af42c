//! Hand-off to the external barcode scanner command.

use std::process::{Command, Stdio};

use tokio::sync::mpsc;

/// What: Run the external barcode scanner and report when it exits.
///
/// Inputs:
/// - `command`: Shell command line that opens the scanner
/// - `done_tx`: Channel receiving `Ok(())` on a clean exit or `Err(message)`
///
/// Details:
/// - Runs through `sh -c` on a blocking thread with stdio detached so the
///   terminal UI keeps control of the screen
/// - A non-zero exit status is reported as an error
pub fn spawn_scanner(command: String, done_tx: mpsc::UnboundedSender<Result<(), String>>) {
    tokio::spawn(async move {
        let cmd = command.clone();
        let ret = tokio::task::spawn_blocking(move || {
            Command::new("sh")
                .arg("-c")
                .arg(&cmd)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
        })
        .await;
        let outcome = match ret {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(format!("Scanner exited with {status}")),
            Ok(Err(e)) => Err(format!("Cannot start scanner `{command}`: {e}")),
            Err(e) => Err(format!("Scanner task failed: {e}")),
        };
        tracing::info!(command = %command, ok = outcome.is_ok(), "scanner closed");
        let _ = done_tx.send(outcome);
    });
}
