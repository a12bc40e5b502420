//! receipt-splitter - interactive grocery receipt splitting
//!
//! This library turns pasted (or photographed) grocery receipts into a
//! settlement between two people. An operator walks through the receipt
//! item by item, assigning each one to a person, to both, or to nobody;
//! the result is two ledger transactions with exact-cent shares.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, receipts, owners, the allocation cursor and expenses
//! - `parser`: Receipt text to priced items
//! - `services`: Allocation state machine and settlement calculator
//! - `session`: The interactive conversation and its collaborator traits
//! - `storage`: Atomic JSON files and the checkpoint store
//! - `ledger`: Local journal and Splitwise backends
//! - `vision`: Reading receipts out of photos
//! - `config`: Configuration and path management
//! - `export` / `display`: Receipt output for the command line
//!
//! # Example
//!
//! ```rust,ignore
//! use receipt_splitter::parser::{parse_receipt, ParserOptions};
//!
//! let receipt = parse_receipt("Bread\nMilk\n2.00\n1.40", &ParserOptions::default());
//! assert_eq!(receipt.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod parser;
pub mod services;
pub mod session;
pub mod storage;
pub mod vision;

pub use error::{SplitterError, SplitterResult};
