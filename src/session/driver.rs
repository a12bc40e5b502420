//! Session driver
//!
//! One session processes operator messages one at a time. Each message is
//! turned into a transition of the session state; the resulting prompts are
//! queued and flushed to the messenger as a single message.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::error::SplitterResult;
use crate::models::{Person, Receipt};
use crate::parser::parse_receipt;
use crate::services::{settle, Allocation, AllocationCommand, AllocationStep, OwnerTotals};
use crate::vision::decode_receipt;

use super::command::{
    parse_allocation_input, parse_payer_input, parse_review_input, InputError, PayerInput,
    ReviewInput, SessionCommand,
};
use super::ports::{
    CheckpointStore, LedgerClient, Messenger, OperatorInput, VisionBridge, VisionExchange,
    VisionTurn,
};
use super::prompts;
use super::watchdog::{triggered, Shutdown, Watchdog};

/// The four collaborators a session talks to
pub struct Collaborators {
    pub messenger: Box<dyn Messenger>,
    pub checkpoints: Box<dyn CheckpointStore>,
    pub ledger: Box<dyn LedgerClient>,
    pub vision: Box<dyn VisionBridge>,
}

/// Where the conversation stands
#[derive(Debug)]
pub enum SessionState {
    /// Waiting for a receipt
    Idle,
    /// A photo was read; waiting for the operator to accept, reject or correct it
    ReviewingPhoto {
        exchange: VisionExchange,
        receipt: Receipt,
    },
    Allocating(Allocation),
    AwaitingPayer(Allocation),
    AwaitingStoreName {
        allocation: Allocation,
        payer: Person,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ReviewingPhoto { .. } => "reviewing_photo",
            Self::Allocating(_) => "allocating",
            Self::AwaitingPayer(_) => "awaiting_payer",
            Self::AwaitingStoreName { .. } => "awaiting_store_name",
        }
    }
}

pub struct Session {
    settings: Settings,
    messenger: Box<dyn Messenger>,
    checkpoints: Box<dyn CheckpointStore>,
    ledger: Box<dyn LedgerClient>,
    vision: Box<dyn VisionBridge>,
    photos_enabled: bool,
    state: SessionState,
    outbox: Vec<String>,
    started: Instant,
    shutdown: Shutdown,
}

impl Session {
    pub fn new(settings: Settings, collaborators: Collaborators) -> Self {
        Self {
            settings,
            messenger: collaborators.messenger,
            checkpoints: collaborators.checkpoints,
            ledger: collaborators.ledger,
            vision: collaborators.vision,
            photos_enabled: true,
            state: SessionState::Idle,
            outbox: Vec::new(),
            started: Instant::now(),
            shutdown: Shutdown::new(),
        }
    }

    /// Whether to advertise photo support in the greeting
    pub fn with_photos_enabled(mut self, enabled: bool) -> Self {
        self.photos_enabled = enabled;
        self
    }

    /// Handle to stop the session from outside (signals, tests)
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run until the messenger closes or the shutdown signal is raised
    ///
    /// Only a failure to receive ends the session with an error; everything
    /// else is reported to the operator.
    pub async fn run(mut self) -> SplitterResult<()> {
        let watchdog = Watchdog::spawn(
            Duration::from_secs(self.settings.session.timeout_secs),
            self.settings.session.timeout_scheme,
            self.shutdown.clone(),
        );
        let mut stop = self.shutdown.subscribe();
        info!(
            timeout_secs = self.settings.session.timeout_secs,
            "session started"
        );

        self.resume_or_greet().await;

        loop {
            let next = tokio::select! {
                _ = triggered(&mut stop) => None,
                input = self.messenger.receive_next() => Some(input),
            };

            match next {
                None => {
                    self.send(prompts::SHUTTING_DOWN).await;
                    break;
                }
                Some(Ok(Some(input))) => {
                    watchdog.kick();
                    self.handle(input).await;
                }
                Some(Ok(None)) => {
                    info!("messenger closed");
                    break;
                }
                Some(Err(e)) => {
                    error!(error = %e, "failed to receive operator input");
                    return Err(e);
                }
            }
        }

        self.send(prompts::GOODBYE).await;
        info!(state = self.state.name(), "session ended");
        Ok(())
    }

    async fn resume_or_greet(&mut self) {
        self.enqueue(prompts::GREETING);

        match self.checkpoints.load().await {
            Ok(Some(checkpoint)) => {
                let receipt_id = checkpoint.receipt.id;
                match Allocation::resume(checkpoint.receipt, checkpoint.cursor) {
                    Ok(allocation) => {
                        info!(receipt = %receipt_id, "resuming from checkpoint");
                        self.enqueue(prompts::FOUND_CHECKPOINT);
                        self.prompt_allocation(allocation).await;
                        return;
                    }
                    Err(e) => warn!(receipt = %receipt_id, error = %e, "ignoring unusable checkpoint"),
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "failed to load checkpoint");
                self.enqueue(format!(
                    "I had an unexpected error loading the checkpoint: {}",
                    e
                ));
            }
        }

        self.send(prompts::ask_for_receipt(self.photos_enabled)).await;
    }

    /// Queue a message for the next send
    fn enqueue(&mut self, text: impl Into<String>) {
        self.outbox.push(text.into());
    }

    /// Send everything queued plus `text` as one message
    ///
    /// On failure the whole text stays queued for the next attempt.
    async fn send(&mut self, text: impl Into<String>) {
        self.enqueue(text);
        let full_text = self.outbox.join("\n\n");
        info!(text = %full_text, "-> operator");

        match self.messenger.send(&full_text).await {
            Ok(()) => self.outbox.clear(),
            Err(e) => error!(error = %e, "failed to send message, keeping it queued"),
        }
    }

    async fn handle(&mut self, input: OperatorInput) {
        info!(
            text = %input.text,
            photo_bytes = input.photo.as_ref().map_or(0, Vec::len),
            state = self.state.name(),
            "<- operator"
        );

        if input.photo.is_none() {
            if let Some(command) = SessionCommand::parse(&input.text) {
                self.handle_session_command(command).await;
                return;
            }
        }

        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Idle => self.handle_idle(input).await,
            SessionState::ReviewingPhoto { exchange, receipt } => {
                self.handle_review(exchange, receipt, &input.text).await
            }
            SessionState::Allocating(allocation) => {
                self.handle_allocation(allocation, &input.text).await
            }
            SessionState::AwaitingPayer(allocation) => {
                self.handle_payer(allocation, &input.text).await
            }
            SessionState::AwaitingStoreName { allocation, payer } => {
                self.handle_store_name(allocation, payer, &input.text).await
            }
        }
    }

    async fn handle_session_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Abort => {
                if matches!(self.state, SessionState::Idle) {
                    self.send(prompts::NOTHING_TO_ABORT).await;
                } else {
                    info!(state = self.state.name(), "receipt aborted");
                    self.finish_receipt().await;
                }
            }
            SessionCommand::Uptime => {
                self.send(prompts::uptime(self.started.elapsed())).await;
            }
            SessionCommand::Finish => {
                info!("finish requested");
                self.shutdown.trigger();
            }
            SessionCommand::Help => {
                self.send(prompts::help(&self.settings.people)).await;
            }
        }
    }

    async fn handle_idle(&mut self, input: OperatorInput) {
        if let Some(image) = input.photo {
            self.send(prompts::SENDING_PHOTO).await;
            match self.read_photo(VisionExchange::new(image)).await {
                Some((exchange, receipt)) => self.review_photo(exchange, receipt).await,
                None => self.send(prompts::MORE_RECEIPTS).await,
            }
            return;
        }

        let receipt = parse_receipt(&input.text, &self.settings.parser);
        if receipt.is_empty() {
            self.send(prompts::NOT_UNDERSTOOD).await;
            return;
        }

        info!(receipt = %receipt.id, items = receipt.len(), "receipt parsed");
        self.send(prompts::receipt_preview(&receipt)).await;
        self.start_allocation(receipt).await;
    }

    async fn start_allocation(&mut self, receipt: Receipt) {
        match Allocation::new(receipt) {
            Ok(allocation) => {
                self.store_checkpoint(&allocation).await;
                self.prompt_allocation(allocation).await;
            }
            Err(_) => {
                self.enqueue(prompts::NOT_UNDERSTOOD);
                self.send(prompts::MORE_RECEIPTS).await;
            }
        }
    }

    /// Ask about the current item, or for the payer once every item is decided
    async fn prompt_allocation(&mut self, allocation: Allocation) {
        match allocation.step() {
            AllocationStep::Prompt(_) => {
                let prompt = prompts::receipt_item(
                    allocation.current_item(),
                    &self.settings.people,
                    allocation.can_undo(),
                );
                self.send(prompt).await;
                self.state = SessionState::Allocating(allocation);
            }
            AllocationStep::Complete => {
                let totals = OwnerTotals::compute(
                    allocation.receipt(),
                    self.settings.settlement.discount_policy,
                );
                self.send(prompts::payer_choice(&totals, &self.settings.people))
                    .await;
                self.state = SessionState::AwaitingPayer(allocation);
            }
        }
    }

    async fn handle_allocation(&mut self, mut allocation: Allocation, text: &str) {
        let command = match parse_allocation_input(text, &self.settings.people) {
            Ok(command) => command,
            Err(InputError::BadPrice) => {
                self.send(prompts::BAD_PRICE).await;
                self.state = SessionState::Allocating(allocation);
                return;
            }
            Err(InputError::Unrecognised) => {
                self.reject_owner_choice(allocation).await;
                return;
            }
        };

        if command == AllocationCommand::Reset {
            self.restart(allocation).await;
            return;
        }

        if allocation.apply(command).is_err() {
            self.reject_owner_choice(allocation).await;
            return;
        }
        if command.mutates_checkpoint() {
            self.store_checkpoint(&allocation).await;
        }
        self.prompt_allocation(allocation).await;
    }

    async fn reject_owner_choice(&mut self, allocation: Allocation) {
        self.send(prompts::owner_choice(
            &self.settings.people,
            allocation.can_undo(),
        ))
        .await;
        self.state = SessionState::Allocating(allocation);
    }

    /// Clear every decision and walk the receipt again from the top
    async fn restart(&mut self, mut allocation: Allocation) {
        allocation.reset();
        info!(receipt = %allocation.receipt().id, "allocation reset");
        self.send(prompts::back_to_beginning(allocation.receipt()))
            .await;
        self.store_checkpoint(&allocation).await;
        self.prompt_allocation(allocation).await;
    }

    async fn handle_payer(&mut self, allocation: Allocation, text: &str) {
        match parse_payer_input(text, &self.settings.people) {
            Some(PayerInput::Payer(payer)) => {
                self.send(prompts::ASK_STORE_NAME).await;
                self.state = SessionState::AwaitingStoreName { allocation, payer };
            }
            Some(PayerInput::Reset) => self.restart(allocation).await,
            None => {
                self.send(prompts::invalid_payer(&self.settings.people))
                    .await;
                self.state = SessionState::AwaitingPayer(allocation);
            }
        }
    }

    async fn handle_store_name(&mut self, allocation: Allocation, payer: Person, text: &str) {
        let store = text.trim();
        if store.is_empty() {
            self.send(prompts::EMPTY_STORE_NAME).await;
            self.state = SessionState::AwaitingStoreName { allocation, payer };
            return;
        }

        let settlement = settle(
            allocation.receipt(),
            payer,
            self.settings.settlement.discount_policy,
            &self.settings.people,
        );
        info!(
            receipt = %allocation.receipt().id,
            %payer,
            store,
            non_shared = %settlement.non_shared.cost,
            shared = %settlement.shared.cost,
            "settling receipt"
        );

        for record in settlement.records() {
            self.send(prompts::creating_expense(record.kind)).await;
            if let Some(reason) = record.skip_reason() {
                self.enqueue(reason);
                continue;
            }
            match self.ledger.create_expense(record, store).await {
                Ok(message) => self.enqueue(message),
                Err(e) => {
                    error!(kind = %record.kind, error = %e, "failed to create expense");
                    self.enqueue(format!("I couldn't create the {} expense: {}", record.kind, e));
                }
            }
        }

        self.finish_receipt().await;
    }

    /// Drop the current receipt and its checkpoint, back to idle
    async fn finish_receipt(&mut self) {
        match self.checkpoints.delete().await {
            Ok(()) => self.enqueue(prompts::CHECKPOINT_DELETED),
            Err(e) => {
                warn!(error = %e, "failed to delete checkpoint");
                self.enqueue(format!(
                    "I had an unexpected error deleting the checkpoint: {}",
                    e
                ));
            }
        }
        self.state = SessionState::Idle;
        self.send(prompts::MORE_RECEIPTS).await;
    }

    /// Persist the allocation; failures are reported but never undo it
    async fn store_checkpoint(&mut self, allocation: &Allocation) {
        if let Err(e) = self.checkpoints.store(&allocation.checkpoint()).await {
            warn!(error = %e, "failed to store checkpoint");
            self.enqueue(format!(
                "I had an unexpected error storing the checkpoint: {}",
                e
            ));
        }
    }

    /// Ask the vision bridge for the receipt, retrying unreadable replies
    async fn read_photo(&mut self, mut exchange: VisionExchange) -> Option<(VisionExchange, Receipt)> {
        let max_attempts = self.settings.vision.max_attempts;

        for attempt in 1..=max_attempts {
            let reply = match self.vision.read_receipt(&exchange).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!(error = %e, "vision request failed");
                    self.send(format!("The vision service replied an error:\n\n{}", e))
                        .await;
                    return None;
                }
            };

            match decode_receipt(&reply) {
                Ok(receipt) => {
                    info!(receipt = %receipt.id, items = receipt.len(), attempt, "photo read");
                    exchange.turns.push(VisionTurn::Reply(reply));
                    return Some((exchange, receipt));
                }
                Err(e) if attempt < max_attempts => {
                    warn!(attempt, error = %e, "unreadable vision reply");
                    self.send(prompts::invalid_vision_json(
                        attempt,
                        max_attempts,
                        &e.to_string(),
                        &reply,
                    ))
                    .await;
                }
                Err(e) => warn!(attempt, error = %e, "unreadable vision reply"),
            }
        }

        self.send(prompts::vision_gave_up(max_attempts)).await;
        None
    }

    async fn review_photo(&mut self, exchange: VisionExchange, receipt: Receipt) {
        self.send(prompts::photo_review(&receipt)).await;
        self.state = SessionState::ReviewingPhoto { exchange, receipt };
    }

    async fn handle_review(&mut self, mut exchange: VisionExchange, receipt: Receipt, text: &str) {
        match parse_review_input(text) {
            ReviewInput::Accept => self.start_allocation(receipt).await,
            ReviewInput::Reject => self.send(prompts::MORE_RECEIPTS).await,
            ReviewInput::FollowUp(prompt) => {
                self.send(prompts::FORWARDING_FOLLOW_UP).await;
                exchange.turns.push(VisionTurn::FollowUp(prompt));
                match self.read_photo(exchange).await {
                    Some((exchange, receipt)) => self.review_photo(exchange, receipt).await,
                    None => self.send(prompts::MORE_RECEIPTS).await,
                }
            }
        }
    }
}
