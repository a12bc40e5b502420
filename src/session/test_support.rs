//! In-memory collaborators for session tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{SplitterError, SplitterResult};
use crate::models::{Checkpoint, ExpenseRecord};

use super::ports::{
    CheckpointStore, LedgerClient, Messenger, OperatorInput, VisionBridge, VisionExchange,
};

/// Plays back scripted inputs and records everything sent
#[derive(Clone, Default)]
pub struct ScriptedMessenger {
    inputs: Arc<Mutex<VecDeque<OperatorInput>>>,
    sent: Arc<Mutex<Vec<String>>>,
    failing_sends: Arc<AtomicUsize>,
    /// Block forever instead of closing once the script is exhausted
    pub hang_when_empty: bool,
}

impl ScriptedMessenger {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messenger = Self::default();
        for text in texts {
            messenger.push(OperatorInput::text(text));
        }
        messenger
    }

    pub fn push(&self, input: OperatorInput) {
        self.inputs.lock().unwrap().push_back(input);
    }

    /// Make the next `count` sends fail
    pub fn fail_next_sends(&self, count: usize) {
        self.failing_sends.store(count, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Every sent message joined, for `contains` checks
    pub fn transcript(&self) -> String {
        self.sent().join("\n\n")
    }
}

#[async_trait]
impl Messenger for ScriptedMessenger {
    async fn receive_next(&mut self) -> SplitterResult<Option<OperatorInput>> {
        let next = self.inputs.lock().unwrap().pop_front();
        match next {
            Some(input) => Ok(Some(input)),
            None if self.hang_when_empty => std::future::pending().await,
            None => Ok(None),
        }
    }

    async fn send(&mut self, text: &str) -> SplitterResult<()> {
        let failing = self.failing_sends.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_sends.store(failing - 1, Ordering::SeqCst);
            return Err(SplitterError::Messenger("send failed".into()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryCheckpointStore {
    slot: Arc<Mutex<Option<Checkpoint>>>,
    writes: Arc<AtomicUsize>,
    pub fail_writes: bool,
    pub fail_loads: bool,
    pub fail_deletes: bool,
}

impl MemoryCheckpointStore {
    pub fn with_checkpoint(checkpoint: Checkpoint) -> Self {
        let store = Self::default();
        *store.slot.lock().unwrap() = Some(checkpoint);
        store
    }

    pub fn current(&self) -> Option<Checkpoint> {
        self.slot.lock().unwrap().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn store(&self, checkpoint: &Checkpoint) -> SplitterResult<()> {
        if self.fail_writes {
            return Err(SplitterError::Checkpoint("disk full".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().unwrap() = Some(checkpoint.clone());
        Ok(())
    }

    async fn load(&self) -> SplitterResult<Option<Checkpoint>> {
        if self.fail_loads {
            return Err(SplitterError::Checkpoint("permission denied".into()));
        }
        Ok(self.current())
    }

    async fn delete(&self) -> SplitterResult<()> {
        if self.fail_deletes {
            return Err(SplitterError::Checkpoint("read-only file system".into()));
        }
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingLedger {
    created: Arc<Mutex<Vec<(ExpenseRecord, String)>>>,
    pub fail: bool,
}

impl RecordingLedger {
    pub fn created(&self) -> Vec<(ExpenseRecord, String)> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerClient for RecordingLedger {
    async fn create_expense(&self, expense: &ExpenseRecord, store: &str) -> SplitterResult<String> {
        if self.fail {
            return Err(SplitterError::Ledger("ledger unavailable".into()));
        }
        self.created
            .lock()
            .unwrap()
            .push((expense.clone(), store.to_string()));
        Ok(format!("Created {} expense.", expense.kind))
    }
}

/// Answers photo requests from a list of canned replies
#[derive(Clone, Default)]
pub struct ScriptedVision {
    replies: Arc<Mutex<VecDeque<SplitterResult<String>>>>,
    requests: Arc<Mutex<Vec<VisionExchange>>>,
}

impl ScriptedVision {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vision = Self::default();
        vision
            .replies
            .lock()
            .unwrap()
            .extend(replies.into_iter().map(|reply| Ok(reply.into())));
        vision
    }

    pub fn requests(&self) -> Vec<VisionExchange> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionBridge for ScriptedVision {
    async fn read_receipt(&self, exchange: &VisionExchange) -> SplitterResult<String> {
        self.requests.lock().unwrap().push(exchange.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SplitterError::Vision("no scripted reply".into())))
    }
}
