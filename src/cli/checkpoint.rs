//! Checkpoint CLI commands

use clap::Subcommand;

use crate::config::{Settings, SplitterPaths};
use crate::display::format_checkpoint;
use crate::error::SplitterResult;
use crate::storage::FileCheckpointStore;

/// Checkpoint subcommands
#[derive(Subcommand, Debug)]
pub enum CheckpointCommands {
    /// Show the receipt saved by an unfinished session
    Show,
    /// Delete the saved receipt
    Clear,
}

pub fn handle_checkpoint_command(
    paths: &SplitterPaths,
    settings: &Settings,
    cmd: CheckpointCommands,
) -> SplitterResult<()> {
    let store = FileCheckpointStore::new(paths.checkpoint_file());

    match cmd {
        CheckpointCommands::Show => match store.load_blocking()? {
            Some(checkpoint) => print!("{}", format_checkpoint(&checkpoint, &settings.people)),
            None => println!("No checkpoint saved."),
        },
        CheckpointCommands::Clear => {
            if store.delete_blocking()? {
                println!("Checkpoint deleted.");
            } else {
                println!("No checkpoint saved.");
            }
        }
    }

    Ok(())
}
