//! File-backed checkpoint store

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{SplitterError, SplitterResult};
use crate::models::Checkpoint;
use crate::session::ports::CheckpointStore;

use super::file_io::{read_json_optional, remove_if_exists, write_json_atomic};

/// Keeps the in-progress allocation in a single JSON file
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn load_blocking(&self) -> SplitterResult<Option<Checkpoint>> {
        read_json_optional(&self.path).map_err(into_checkpoint_error)
    }

    pub fn delete_blocking(&self) -> SplitterResult<bool> {
        remove_if_exists(&self.path).map_err(into_checkpoint_error)
    }
}

fn into_checkpoint_error(err: SplitterError) -> SplitterError {
    match err {
        SplitterError::Storage(msg) => SplitterError::Checkpoint(msg),
        other => other,
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn store(&self, checkpoint: &Checkpoint) -> SplitterResult<()> {
        write_json_atomic(&self.path, checkpoint).map_err(into_checkpoint_error)?;
        debug!(receipt = %checkpoint.receipt.id, "checkpoint stored");
        Ok(())
    }

    async fn load(&self) -> SplitterResult<Option<Checkpoint>> {
        self.load_blocking()
    }

    async fn delete(&self) -> SplitterResult<()> {
        if self.delete_blocking()? {
            debug!(path = %self.path.display(), "checkpoint deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationCursor, LineItem, Money, Owner, Receipt};
    use tempfile::TempDir;

    fn checkpoint() -> Checkpoint {
        let mut receipt = Receipt::new(vec![
            LineItem::new("Bread", Money::from_cents(200)),
            LineItem::new("Milk", Money::from_cents(140)),
        ]);
        receipt.items[0].owner = Some(Owner::Shared);
        Checkpoint::new(receipt, AllocationCursor::at(1))
    }

    #[tokio::test]
    async fn test_missing_checkpoint_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCheckpointStore::new(temp_dir.path().join("checkpoint.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_load_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCheckpointStore::new(temp_dir.path().join("data").join("checkpoint.json"));
        let saved = checkpoint();

        store.store(&saved).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(saved));

        store.delete().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // a second delete is fine
        store.delete().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_checkpoint_is_checkpoint_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("checkpoint.json");
        std::fs::write(&path, "{").unwrap();

        let err = FileCheckpointStore::new(path).load().await.unwrap_err();
        assert!(matches!(err, SplitterError::Checkpoint(_)));
    }
}
