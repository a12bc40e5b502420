//! Interactive session command
//!
//! Wires the console, the checkpoint file, the configured ledger and the
//! vision client into a session and runs it until the operator finishes,
//! input closes, the time budget runs out or Ctrl-C is pressed.

use clap::Args;
use tracing::{info, warn};

use crate::config::{Settings, SplitterPaths};
use crate::error::SplitterResult;
use crate::ledger::Ledger;
use crate::session::{Collaborators, ConsoleMessenger, Session};
use crate::storage::FileCheckpointStore;
use crate::vision::VisionClient;

#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Splitwise API token (needed with the splitwise ledger backend)
    #[arg(long, env = "SPLITWISE_TOKEN", hide_env_values = true)]
    pub splitwise_token: Option<String>,

    /// OpenAI API key; photo reading is disabled without it
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Override the session time budget, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Run an interactive session on the terminal
pub async fn handle_session_command(
    paths: &SplitterPaths,
    mut settings: Settings,
    args: SessionArgs,
) -> SplitterResult<()> {
    if let Some(timeout) = args.timeout {
        settings.session.timeout_secs = timeout;
        settings.validate()?;
    }
    paths.ensure_directories()?;

    let ledger = Ledger::from_settings(&settings, paths, args.splitwise_token)?;
    let vision = VisionClient::from_key(args.openai_api_key, &settings.vision);
    let photos_enabled = vision.is_active();
    info!(
        ledger = ?settings.ledger.backend,
        photos_enabled,
        "starting interactive session"
    );

    let session = Session::new(
        settings,
        Collaborators {
            messenger: Box::new(ConsoleMessenger::stdio()),
            checkpoints: Box::new(FileCheckpointStore::new(paths.checkpoint_file())),
            ledger: Box::new(ledger),
            vision: Box::new(vision),
        },
    )
    .with_photos_enabled(photos_enabled);

    let shutdown = session.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received");
                shutdown.trigger();
            }
            Err(e) => warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });

    session.run().await
}
