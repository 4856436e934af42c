//! Runtime wiring: channels, workers and the event loop.

use std::sync::Arc;

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::sources::{HttpSource, JsonFileSource, RecordSource, UnconfiguredSource};
use crate::state::{AppState, FocusEvent};
use crate::util::config::{Settings, SourceChoice};

use super::terminal::{restore_terminal, setup_terminal};

mod background;
pub mod channels;
mod cleanup;
mod event_loop;
pub mod handlers;
pub mod workers;

use background::{spawn_event_thread, spawn_tick_worker};
use channels::Channels;
use cleanup::cleanup_on_exit;
use event_loop::run_event_loop;
use workers::fetch::spawn_fetch_worker;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Start the fetch worker for a concrete source.
///
/// Inputs:
/// - `source`: Record source
/// - `channels`: Channels; the fetch request receiver is taken out
///
/// Output:
/// - Description of the source for the status line
fn launch_fetch_worker<S: RecordSource>(source: S, channels: &mut Channels) -> String {
    let label = source.describe();
    match channels.fetch_rx.take() {
        Some(fetch_rx) => {
            spawn_fetch_worker(fetch_rx, channels.fetch_res_tx.clone(), Arc::new(source));
        }
        None => tracing::warn!("fetch worker already running"),
    }
    label
}

/// What: Build the configured record source and start its worker.
///
/// Inputs:
/// - `choice`: Resolved source selection
/// - `channels`: Channels; the fetch request receiver is taken out
///
/// Output:
/// - Source description, or an error when the HTTP client cannot be built
fn start_source(choice: SourceChoice, channels: &mut Channels) -> Result<String> {
    let label = match choice {
        SourceChoice::Http { url, token } => {
            launch_fetch_worker(HttpSource::new(url, token)?, channels)
        }
        SourceChoice::File(path) => launch_fetch_worker(JsonFileSource::new(path), channels),
        SourceChoice::Unconfigured => {
            tracing::warn!("no record source configured");
            launch_fetch_worker(UnconfiguredSource, channels)
        }
    };
    tracing::info!(source = %label, "record source ready");
    Ok(label)
}

/// What: Run the inventory screen end-to-end: initialize terminal and state, spawn
/// background workers, drive the event loop, and restore the terminal on exit.
///
/// Inputs:
/// - `settings`: Settings after command-line overrides
/// - `headless_flag`: Run without a terminal (also enabled by `SCANSHELF_TEST_HEADLESS=1`)
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on unrecoverable terminal or source setup errors.
///
/// Details:
/// - The screen starts focused, which issues the first fetch
/// - On exit the controller is torn down before the terminal is restored
pub async fn run(settings: Settings, headless_flag: bool) -> Result<()> {
    let headless = headless_flag
        || std::env::var("SCANSHELF_TEST_HEADLESS").ok().as_deref() == Some("1");

    let mut channels = Channels::new();
    let source_label = start_source(settings.source_choice(), &mut channels)?;

    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let mut app = AppState {
        source_label,
        scan_command: settings.scan_command,
        ..AppState::default()
    };

    spawn_tick_worker(channels.tick_tx.clone());
    spawn_event_thread(
        headless,
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );

    app.deliver_focus(FocusEvent::Focused, &channels.fetch_tx, &channels.net_err_tx);

    run_event_loop(&mut terminal, &mut app, &mut channels).await;

    cleanup_on_exit(&mut app, &channels);
    if !headless {
        restore_terminal()?;
    }
    Ok(())
}
