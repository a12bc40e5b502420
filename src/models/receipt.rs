//! Receipt model
//!
//! A receipt is the ordered list of priced lines produced by the parser.
//! Order matters only as the default allocation walk.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ReceiptId;
use super::money::Money;
use super::owner::Owner;

/// A single priced line of a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,

    /// Excerpt of the text following this item's price, shown to help the
    /// operator recognise the next line. Empty for list-shaped receipts.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hint: String,

    pub price: Money,

    /// None until the operator assigns the item
    #[serde(default)]
    pub owner: Option<Owner>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            hint: String::new(),
            price,
            owner: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn is_assigned(&self) -> bool {
        self.owner.is_some()
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.price)
    }
}

/// A parsed receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ReceiptId,
    pub items: Vec<LineItem>,
}

impl Receipt {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self {
            id: ReceiptId::new(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Number of items that still need an owner
    pub fn unassigned_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_assigned()).count()
    }

    /// Whether every item has an owner (including `NotAnItem`)
    pub fn is_fully_assigned(&self) -> bool {
        self.items.iter().all(LineItem::is_assigned)
    }

    /// Index of the first unassigned item, if any
    pub fn first_unassigned(&self) -> Option<usize> {
        self.items.iter().position(|item| !item.is_assigned())
    }

    /// Clear every owner
    pub fn clear_owners(&mut self) {
        for item in &mut self.items {
            item.owner = None;
        }
    }

    /// Render as a list-shaped receipt: all names, then all prices
    ///
    /// Parsing this text gives back the same items (names and prices) as
    /// long as every name is non-empty. An empty name becomes a blank line,
    /// and the parser trims a leading blank line away.
    pub fn to_text(&self) -> String {
        self.items
            .iter()
            .map(|item| item.name.clone())
            .chain(self.items.iter().map(|item| item.price.to_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
