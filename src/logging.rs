//! Tracing setup
//!
//! Logs go to a file under the data directory because stdout is the
//! console messenger's chat channel.

use std::fs::OpenOptions;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::SplitterPaths;
use crate::error::{SplitterError, SplitterResult};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "receipt_splitter=info,warn";

/// Install the global subscriber, appending to the log file
pub fn init_tracing(paths: &SplitterPaths) -> SplitterResult<()> {
    std::fs::create_dir_all(paths.log_dir())?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SplitterError::Config(format!("Failed to set tracing subscriber: {}", e)))
}
