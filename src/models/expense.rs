//! Expense records handed to the ledger

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::owner::Person;

/// Which settlement transaction an expense represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    /// The payer advanced money for the borrower's own items
    NonShared,
    /// Items both people share
    Shared,
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonShared => write!(f, "non-shared"),
            Self::Shared => write!(f, "shared"),
        }
    }
}

/// What one person paid and owes within an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserShare {
    pub paid: Money,
    pub owed: Money,
}

impl UserShare {
    pub fn new(paid: Money, owed: Money) -> Self {
        Self { paid, owed }
    }
}

/// A single settlement transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub kind: ExpenseKind,
    pub cost: Money,
    pub payer: Person,
    pub share_a: UserShare,
    pub share_b: UserShare,
    pub description: String,
}

impl ExpenseRecord {
    pub fn share(&self, person: Person) -> &UserShare {
        match person {
            Person::A => &self.share_a,
            Person::B => &self.share_b,
        }
    }

    /// Replace one person's share
    pub fn with_share(mut self, person: Person, share: UserShare) -> Self {
        match person {
            Person::A => self.share_a = share,
            Person::B => self.share_b = share,
        }
        self
    }

    /// Zero and negative costs are never sent to the ledger
    pub fn is_submittable(&self) -> bool {
        self.cost.is_positive()
    }

    /// Reason this expense is skipped, if it is
    pub fn skip_reason(&self) -> Option<&'static str> {
        if self.cost.is_negative() {
            Some("Skipping expense with negative cost.")
        } else if self.cost.is_zero() {
            Some("Skipping expense with cost zero.")
        } else {
            None
        }
    }
}
