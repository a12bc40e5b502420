//! Interactive session
//!
//! The conversation with the operator: receiving receipts, walking through
//! their items and settling them. The driver only depends on the traits in
//! [`ports`], so the console, the checkpoint file, the ledger and the vision
//! service can all be replaced.

pub mod command;
pub mod console;
pub mod driver;
pub mod ports;
pub mod prompts;
pub mod watchdog;

#[cfg(test)]
pub mod test_support;

pub use console::{ConsoleMessenger, StdinLines};
pub use driver::{Collaborators, Session, SessionState};
pub use ports::{
    CheckpointStore, LedgerClient, Messenger, OperatorInput, VisionBridge, VisionExchange,
    VisionTurn,
};
pub use watchdog::{Shutdown, Watchdog};
