//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;
use scanshelf::util::config::Settings;

/// Scanshelf - a terminal inventory list for barcode-scanned products
#[derive(Parser, Debug, Default)]
#[command(name = "scanshelf")]
#[command(version)]
#[command(about = "A terminal inventory list for barcode-scanned products", long_about = None)]
pub struct Args {
    /// HTTP endpoint listing inventory rows (overrides `source_url`)
    #[arg(long)]
    pub source_url: Option<String>,

    /// JSON file holding inventory rows (overrides `source_file`)
    #[arg(long)]
    pub source_file: Option<PathBuf>,

    /// Bearer token for the HTTP endpoint (overrides `api_token`)
    #[arg(long)]
    pub api_token: Option<String>,

    /// Shell command that opens the barcode scanner (overrides `scan_command`)
    #[arg(long)]
    pub scan_command: Option<String>,

    /// Configuration directory (default: ~/.config/scanshelf)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Run without drawing to the terminal
    #[arg(long)]
    pub headless: bool,
}

/// What: Determine the log level from command line arguments.
///
/// Inputs:
/// - `args`: Parsed command line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level`.
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Layer command-line values over settings read from disk.
///
/// Inputs:
/// - `settings`: Settings loaded from `settings.conf`
/// - `args`: Parsed command line arguments
///
/// Output:
/// - Settings where every flag given on the command line wins
///
/// Details:
/// - `--source-file` clears a configured `source_url` so the flag is honored
///   even though HTTP takes precedence otherwise
pub fn apply_overrides(mut settings: Settings, args: &Args) -> Settings {
    if let Some(url) = &args.source_url {
        settings.source_url = Some(url.clone());
    } else if let Some(path) = &args.source_file {
        settings.source_url = None;
        settings.source_file = Some(path.clone());
    }
    if let Some(token) = &args.api_token {
        settings.api_token = Some(token.clone());
    }
    if let Some(cmd) = &args.scan_command {
        settings.scan_command = Some(cmd.clone());
    }
    settings
}
