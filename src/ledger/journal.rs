//! Local expense journal
//!
//! Each recorded expense is appended to a JSONL file as one complete JSON
//! object per line. The file is only ever appended to.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SplitterError, SplitterResult};
use crate::models::{ExpenseId, ExpenseRecord};
use crate::session::ports::LedgerClient;

/// One line of the journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: ExpenseId,
    pub recorded_at: DateTime<Utc>,
    pub store: String,
    pub expense: ExpenseRecord,
}

impl JournalEntry {
    pub fn new(store: impl Into<String>, expense: ExpenseRecord) -> Self {
        Self {
            id: ExpenseId::new(),
            recorded_at: Utc::now(),
            store: store.into(),
            expense,
        }
    }
}

/// Ledger backend writing to the expense journal
#[derive(Debug, Clone)]
pub struct JournalLedger {
    path: PathBuf,
}

impl JournalLedger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one entry and flush it
    pub fn append(&self, entry: &JournalEntry) -> SplitterResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SplitterError::Io(format!("Failed to create journal directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SplitterError::Io(format!("Failed to open expense journal: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| SplitterError::Json(format!("Failed to serialize journal entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| SplitterError::Io(format!("Failed to write journal entry: {}", e)))?;
        file.flush()
            .map_err(|e| SplitterError::Io(format!("Failed to flush expense journal: {}", e)))?;

        Ok(())
    }

    /// Read every entry, oldest first
    pub fn read_all(&self) -> SplitterResult<Vec<JournalEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| SplitterError::Io(format!("Failed to open expense journal: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                SplitterError::Io(format!("Failed to read journal line {}: {}", line_num + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                SplitterError::Json(format!(
                    "Failed to parse journal entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

#[async_trait]
impl LedgerClient for JournalLedger {
    async fn create_expense(&self, expense: &ExpenseRecord, store: &str) -> SplitterResult<String> {
        if let Some(reason) = expense.skip_reason() {
            return Ok(reason.to_string());
        }

        let entry = JournalEntry::new(store, expense.clone());
        self.append(&entry)
            .map_err(|e| SplitterError::Ledger(e.to_string()))?;
        info!(id = %entry.id, kind = %expense.kind, cost = %expense.cost, "expense recorded in journal");

        Ok(format!("Expense {} recorded in the journal.", entry.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseKind, Money, Person, UserShare};
    use tempfile::TempDir;

    fn expense(cents: i64) -> ExpenseRecord {
        let cost = Money::from_cents(cents);
        ExpenseRecord {
            kind: ExpenseKind::Shared,
            cost,
            payer: Person::A,
            share_a: UserShare::new(cost, Money::from_cents(cents / 2)),
            share_b: UserShare::new(Money::zero(), cost - Money::from_cents(cents / 2)),
            description: "shared".to_string(),
        }
    }

    fn create_test_journal() -> (JournalLedger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let journal = JournalLedger::new(temp_dir.path().join("data").join("expenses.jsonl"));
        (journal, temp_dir)
    }

    #[tokio::test]
    async fn test_create_expense_appends() {
        let (journal, _temp) = create_test_journal();

        let message = journal.create_expense(&expense(101), "Lidl").await.unwrap();
        assert!(message.contains("recorded"));
        journal.create_expense(&expense(250), "Tesco").await.unwrap();

        let entries = journal.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].store, "Lidl");
        assert_eq!(entries[0].expense.cost.cents(), 101);
        assert_eq!(entries[1].store, "Tesco");
    }

    #[tokio::test]
    async fn test_unsubmittable_expenses_are_skipped() {
        let (journal, _temp) = create_test_journal();

        let message = journal.create_expense(&expense(0), "Lidl").await.unwrap();
        assert_eq!(message, "Skipping expense with cost zero.");
        let message = journal.create_expense(&expense(-10), "Lidl").await.unwrap();
        assert_eq!(message, "Skipping expense with negative cost.");

        assert!(journal.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_journal_is_empty() {
        let (journal, _temp) = create_test_journal();
        assert!(journal.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let (journal, _temp) = create_test_journal();
        journal.append(&JournalEntry::new("Lidl", expense(100))).unwrap();
        let mut file = OpenOptions::new().append(true).open(journal.path()).unwrap();
        writeln!(file, "not json").unwrap();

        let err = journal.read_all().unwrap_err().to_string();
        assert!(err.contains("line 2"), "{err}");
    }
}
