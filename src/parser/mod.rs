//! Receipt text parser
//!
//! Turns an unstructured block of receipt text into an ordered list of
//! priced items. Parsing never fails: an empty receipt means the text was
//! not understood, and unreadable prices degrade to zero.
//!
//! Two layouts are recognised by line count:
//!
//! - a single line, where names and prices are interleaved
//!   (see [`single_line`]);
//! - several lines, all names followed by all prices (see [`multi_line`]).

mod multi_line;
pub mod price;
mod single_line;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Receipt;

pub use price::{is_price_token, parse_amount, parse_price_token};

/// Parser behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Whether a leading `-` makes a price negative (discount lines)
    #[serde(default = "default_accept_discounts")]
    pub accept_discounts: bool,
}

fn default_accept_discounts() -> bool {
    true
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            accept_discounts: default_accept_discounts(),
        }
    }
}

/// Receipt layout detected from the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptShape {
    SingleLine,
    MultiLine,
}

impl ReceiptShape {
    pub fn detect(text: &str) -> Self {
        if text.trim().lines().count() > 1 {
            Self::MultiLine
        } else {
            Self::SingleLine
        }
    }
}

/// Parse receipt text into a receipt with unassigned items
pub fn parse_receipt(text: &str, options: &ParserOptions) -> Receipt {
    let text = text.trim();
    let shape = ReceiptShape::detect(text);
    let items = match shape {
        ReceiptShape::SingleLine => single_line::parse(text, options),
        ReceiptShape::MultiLine => multi_line::parse(text, options),
    };
    debug!(?shape, items = items.len(), "parsed receipt text");
    Receipt::new(items)
}
