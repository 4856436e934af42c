//! Scanshelf binary entrypoint kept minimal. The full runtime lives in `app`.

mod args;

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use clap::Parser;
use scanshelf::app;
use scanshelf::util::{config::Settings, config_dir, logs_dir, settings_path};

struct ScanshelfTimer;

impl tracing_subscriber::fmt::time::FormatTime for ScanshelfTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `<config_dir>/logs/scanshelf.log`.
///
/// Inputs:
/// - `cfg_dir`: Resolved configuration directory
/// - `level`: Default filter when `RUST_LOG` is unset
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened
fn init_logging(cfg_dir: &Path, level: &str) {
    let log_path = logs_dir(cfg_dir).join("scanshelf.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(ScanshelfTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // The TUI owns stdout; stderr keeps startup going.
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(ScanshelfTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    let cfg_dir = config_dir(args.config_dir.as_deref());
    init_logging(&cfg_dir, &args::determine_log_level(&args));

    let settings = args::apply_overrides(Settings::load(&settings_path(&cfg_dir)), &args);
    tracing::info!(
        headless = args.headless,
        scanner = settings.scan_command.is_some(),
        "Scanshelf starting"
    );
    if let Err(err) = app::run(settings, args.headless).await {
        tracing::error!(error = ?err, "Application error");
        eprintln!("scanshelf: {err}");
        std::process::exit(1);
    }
    tracing::info!("Scanshelf exited");
}
