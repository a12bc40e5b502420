//! Expense journal command

use clap::Args;

use crate::config::{Settings, SplitterPaths};
use crate::display::format_journal;
use crate::error::SplitterResult;
use crate::ledger::JournalLedger;

#[derive(Args, Debug)]
pub struct JournalArgs {
    /// Number of most recent expenses to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// List expenses recorded by the local ledger backend
pub fn handle_journal_command(
    paths: &SplitterPaths,
    settings: &Settings,
    args: JournalArgs,
) -> SplitterResult<()> {
    let entries = JournalLedger::new(paths.journal_file()).read_all()?;
    let skip = entries.len().saturating_sub(args.limit);
    print!("{}", format_journal(
        &entries[skip..],
        &settings.people,
        &settings.ledger.currency_code,
    ));
    if entries.is_empty() {
        println!();
    }
    Ok(())
}
