//! Operator command vocabulary
//!
//! Inputs are matched case-insensitively after trimming. Anything outside
//! the vocabulary of the current state is rejected here, before any state
//! is touched.

use crate::models::{Owner, People, Person};
use crate::parser::parse_amount;
use crate::services::AllocationCommand;

pub const SHARED: &str = "s";
pub const NOT_AN_ITEM: &str = "n";
pub const DELAY: &str = "d";
pub const UNDO: &str = "u";
pub const NEW_PRICE: &str = "p";
pub const RESET: &str = "r";

/// Commands accepted in every state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Abort,
    Uptime,
    Finish,
    Help,
}

impl SessionCommand {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "/abort" => Some(Self::Abort),
            "/uptime" => Some(Self::Uptime),
            "/finish" => Some(Self::Finish),
            "/help" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Why an allocation answer was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Not a command of the vocabulary
    Unrecognised,
    /// `p` followed by something that is not an amount
    BadPrice,
}

/// Parse an answer to the "who owns this item" prompt
pub fn parse_allocation_input(text: &str, people: &People) -> Result<AllocationCommand, InputError> {
    let text = text.trim().to_lowercase();

    if let Some(amount) = text.strip_prefix(NEW_PRICE).and_then(|rest| {
        // "p 1.20", not "pizza"
        rest.starts_with(char::is_whitespace).then_some(rest)
    }) {
        return parse_amount(amount)
            .map(AllocationCommand::OverridePrice)
            .ok_or(InputError::BadPrice);
    }

    if let Some(person) = people.person_for_code(&text) {
        return Ok(AllocationCommand::Assign(Owner::from(person)));
    }

    match text.as_str() {
        SHARED => Ok(AllocationCommand::Assign(Owner::Shared)),
        NOT_AN_ITEM => Ok(AllocationCommand::Assign(Owner::NotAnItem)),
        DELAY => Ok(AllocationCommand::Delay),
        UNDO => Ok(AllocationCommand::Undo),
        RESET => Ok(AllocationCommand::Reset),
        _ => Err(InputError::Unrecognised),
    }
}

/// Answer to the "who paid" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayerInput {
    Payer(Person),
    Reset,
}

pub fn parse_payer_input(text: &str, people: &People) -> Option<PayerInput> {
    let text = text.trim().to_lowercase();
    if let Some(person) = people.person_for_code(&text) {
        return Some(PayerInput::Payer(person));
    }
    (text == RESET).then_some(PayerInput::Reset)
}

/// Answer to a photo-reading result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewInput {
    Accept,
    Reject,
    /// Anything else goes back to the vision model as a correction
    FollowUp(String),
}

pub fn parse_review_input(text: &str) -> ReviewInput {
    match text.trim().to_lowercase().as_str() {
        "y" | "yes" => ReviewInput::Accept,
        "n" | "no" => ReviewInput::Reject,
        _ => ReviewInput::FollowUp(text.trim().to_string()),
    }
}
