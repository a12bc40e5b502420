//! Checkpoint snapshot
//!
//! Everything needed to resume an allocation after the process restarts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cursor::AllocationCursor;
use super::receipt::Receipt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub receipt: Receipt,
    #[serde(default)]
    pub cursor: AllocationCursor,
    pub saved_at: DateTime<Utc>,
}

impl Checkpoint {
    pub fn new(receipt: Receipt, cursor: AllocationCursor) -> Self {
        Self {
            receipt,
            cursor,
            saved_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Money, Owner};

    #[test]
    fn test_checkpoint_round_trip() {
        let mut receipt = Receipt::new(vec![
            LineItem::new("Bread", Money::from_cents(200)),
            LineItem::new("Milk", Money::from_cents(140)),
        ]);
        receipt.items[0].owner = Some(Owner::PersonA);
        let cursor = AllocationCursor {
            position: 1,
            last_touched: Some(0),
        };

        let checkpoint = Checkpoint::new(receipt, cursor);
        let json = serde_json::to_string(&checkpoint).unwrap();
        let back: Checkpoint = serde_json::from_str(&json).unwrap();

        assert_eq!(back, checkpoint);
    }
}
