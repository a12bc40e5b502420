//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the session and services.

pub mod checkpoint;
pub mod journal;
pub mod parse;
pub mod session;

pub use checkpoint::{handle_checkpoint_command, CheckpointCommands};
pub use journal::{handle_journal_command, JournalArgs};
pub use parse::{handle_parse_command, OutputFormat, ParseArgs};
pub use session::{handle_session_command, SessionArgs};
