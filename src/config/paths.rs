//! Path management for receipt-splitter
//!
//! ## Path Resolution Order
//!
//! 1. `RECEIPT_SPLITTER_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/receipt-splitter` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{SplitterError, SplitterResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "RECEIPT_SPLITTER_DATA_DIR";

/// Manages all paths used by receipt-splitter
#[derive(Debug, Clone)]
pub struct SplitterPaths {
    base_dir: PathBuf,
}

impl SplitterPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> SplitterResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "receipt-splitter")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SplitterError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn checkpoint_file(&self) -> PathBuf {
        self.data_dir().join("checkpoint.json")
    }

    /// Expense journal used by the local ledger backend
    pub fn journal_file(&self) -> PathBuf {
        self.data_dir().join("expenses.jsonl")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir().join("receipt-splitter.log")
    }

    /// Create the base, data and log directories
    pub fn ensure_directories(&self) -> SplitterResult<()> {
        for dir in [self.base_dir.clone(), self.data_dir(), self.log_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                SplitterError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
