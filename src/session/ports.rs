//! Collaborators of the session driver
//!
//! The driver only talks to the outside world through these traits, so
//! every backend can be swapped for an in-memory fake in tests.

use async_trait::async_trait;

use crate::error::SplitterResult;
use crate::models::{Checkpoint, ExpenseRecord};

/// One inbound operator message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorInput {
    pub text: String,
    /// Raw image bytes when the operator sent a photo
    pub photo: Option<Vec<u8>>,
}

impl OperatorInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            photo: None,
        }
    }

    pub fn photo(bytes: Vec<u8>) -> Self {
        Self {
            text: String::new(),
            photo: Some(bytes),
        }
    }
}

/// Chat transport between the operator and the session
#[async_trait]
pub trait Messenger: Send {
    /// Wait for the next operator message; `None` once the channel is closed
    async fn receive_next(&mut self) -> SplitterResult<Option<OperatorInput>>;

    async fn send(&mut self, text: &str) -> SplitterResult<()>;
}

/// Durable storage for the single in-progress allocation
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    async fn store(&self, checkpoint: &Checkpoint) -> SplitterResult<()>;

    /// `Ok(None)` when no checkpoint exists
    async fn load(&self) -> SplitterResult<Option<Checkpoint>>;

    /// Deleting a missing checkpoint succeeds
    async fn delete(&self) -> SplitterResult<()>;
}

/// Destination of settlement transactions
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Record one expense, returning a message for the operator
    async fn create_expense(&self, expense: &ExpenseRecord, store: &str) -> SplitterResult<String>;
}

/// One step of a photo-reading conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionTurn {
    /// What the model answered previously
    Reply(String),
    /// A correction or instruction typed by the operator
    FollowUp(String),
}

/// A receipt photo plus the conversation about it so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisionExchange {
    pub image: Vec<u8>,
    pub turns: Vec<VisionTurn>,
}

impl VisionExchange {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image,
            turns: Vec::new(),
        }
    }
}

/// Reads receipts out of photos
#[async_trait]
pub trait VisionBridge: Send + Sync {
    /// Ask for the receipt lines; the reply should hold a JSON array of
    /// `{"name": .., "euro_cents": ..}` objects
    async fn read_receipt(&self, exchange: &VisionExchange) -> SplitterResult<String>;
}
