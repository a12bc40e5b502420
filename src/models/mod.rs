//! Core data models for receipt-splitter
//!
//! Money, receipts and their owners, the allocation cursor, the expenses
//! produced by settlement and the checkpoint snapshot.

pub mod checkpoint;
pub mod cursor;
pub mod expense;
pub mod ids;
pub mod money;
pub mod owner;
pub mod receipt;

pub use checkpoint::Checkpoint;
pub use cursor::AllocationCursor;
pub use expense::{ExpenseKind, ExpenseRecord, UserShare};
pub use ids::{ExpenseId, ReceiptId};
pub use money::{Money, MAX_LINE_PRICE};
pub use owner::{Owner, People, Person, PersonProfile};
pub use receipt::{LineItem, Receipt};
