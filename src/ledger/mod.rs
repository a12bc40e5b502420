//! Ledger backends for settlement transactions

pub mod journal;
pub mod splitwise;

use async_trait::async_trait;

use crate::config::{LedgerBackend, Settings, SplitterPaths};
use crate::error::{SplitterError, SplitterResult};
use crate::models::ExpenseRecord;
use crate::session::ports::LedgerClient;

pub use journal::{JournalEntry, JournalLedger};
pub use splitwise::SplitwiseClient;

/// The ledger backend chosen in the settings
pub enum Ledger {
    Journal(JournalLedger),
    Splitwise(SplitwiseClient),
}

impl Ledger {
    /// Select the backend; Splitwise needs an API token
    pub fn from_settings(
        settings: &Settings,
        paths: &SplitterPaths,
        splitwise_token: Option<String>,
    ) -> SplitterResult<Self> {
        match settings.ledger.backend {
            LedgerBackend::Journal => Ok(Ledger::Journal(JournalLedger::new(paths.journal_file()))),
            LedgerBackend::Splitwise => match splitwise_token {
                Some(token) if !token.trim().is_empty() => Ok(Ledger::Splitwise(
                    SplitwiseClient::new(token, settings.ledger.clone()),
                )),
                _ => Err(SplitterError::Config(
                    "The splitwise ledger backend needs SPLITWISE_TOKEN".into(),
                )),
            },
        }
    }
}

#[async_trait]
impl LedgerClient for Ledger {
    async fn create_expense(&self, expense: &ExpenseRecord, store: &str) -> SplitterResult<String> {
        match self {
            Ledger::Journal(journal) => journal.create_expense(expense, store).await,
            Ledger::Splitwise(client) => client.create_expense(expense, store).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backend_selection() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        assert!(matches!(
            Ledger::from_settings(&settings, &paths, None),
            Ok(Ledger::Journal(_))
        ));

        settings.ledger.backend = LedgerBackend::Splitwise;
        assert!(Ledger::from_settings(&settings, &paths, None).is_err());
        assert!(matches!(
            Ledger::from_settings(&settings, &paths, Some("token".into())),
            Ok(Ledger::Splitwise(_))
        ));
    }
}
