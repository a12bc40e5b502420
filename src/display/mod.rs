//! Display formatting for terminal output
//!
//! Plain-text tables for receipts, their totals, saved checkpoints and the
//! expense journal.

pub mod journal;
pub mod receipt;

pub use journal::format_journal;
pub use receipt::{format_checkpoint, format_receipt_table, format_totals};
