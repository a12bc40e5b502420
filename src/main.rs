use anyhow::Result;
use clap::{Parser, Subcommand};

use receipt_splitter::cli::{
    handle_checkpoint_command, handle_journal_command, handle_parse_command,
    handle_session_command, CheckpointCommands, JournalArgs, ParseArgs, SessionArgs,
};
use receipt_splitter::config::{Settings, SplitterPaths};
use receipt_splitter::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "splitter",
    version,
    about = "Interactive grocery receipt splitting",
    long_about = "Splits grocery receipts between two people. Paste a receipt, \
                  decide who owns each item, and get two settlement expenses \
                  with exact-cent shares."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    #[command(alias = "run")]
    Session(SessionArgs),

    /// Parse receipt text and print or export the items
    Parse(ParseArgs),

    /// Inspect or clear the saved receipt
    #[command(subcommand)]
    Checkpoint(CheckpointCommands),

    /// List expenses recorded in the local journal
    Journal(JournalArgs),

    /// Create the data directory and a default configuration
    Init,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = SplitterPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Session(args)) => {
            init_tracing(&paths)?;
            handle_session_command(&paths, settings, args).await?;
        }
        Some(Commands::Parse(args)) => handle_parse_command(&settings, args)?,
        Some(Commands::Checkpoint(cmd)) => handle_checkpoint_command(&paths, &settings, cmd)?,
        Some(Commands::Journal(args)) => handle_journal_command(&paths, &settings, args)?,
        Some(Commands::Init) => {
            println!("Initializing receipt-splitter at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            if paths.is_initialized() {
                println!("Configuration already exists, leaving it unchanged.");
            } else {
                settings.save(&paths)?;
                println!("Default configuration written to: {}", paths.settings_file().display());
            }
            println!();
            println!("Edit the people section to set names and command codes.");
            println!("Run 'splitter session' to split a receipt.");
        }
        Some(Commands::Config) => {
            println!("receipt-splitter Configuration");
            println!("==============================");
            println!("Config file:      {}", paths.settings_file().display());
            println!("Checkpoint file:  {}", paths.checkpoint_file().display());
            println!("Journal file:     {}", paths.journal_file().display());
            println!("Log file:         {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        None => {
            println!("receipt-splitter - interactive grocery receipt splitting");
            println!();
            println!("Run 'splitter --help' for usage information.");
            println!("Run 'splitter session' to split a receipt.");
        }
    }

    Ok(())
}
