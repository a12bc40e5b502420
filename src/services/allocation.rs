//! Interactive allocation of receipt items to owners
//!
//! The operator is walked through the receipt one item at a time. Each answer
//! assigns an owner, defers the decision, undoes the previous assignment,
//! corrects a price or starts over. The walk is cyclic so deferred items come
//! back once everything after them has been decided.

use thiserror::Error;
use tracing::debug;

use crate::models::{AllocationCursor, Checkpoint, LineItem, Money, Owner, Receipt};

/// An operator decision for the current item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationCommand {
    Assign(Owner),
    Delay,
    Undo,
    OverridePrice(Money),
    Reset,
}

impl AllocationCommand {
    /// Whether applying this command changes owners or prices and must be
    /// checkpointed
    pub fn mutates_checkpoint(&self) -> bool {
        !matches!(self, Self::Delay)
    }
}

/// Where the walk stands after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStep {
    /// Ask the operator about the item at this index
    Prompt(usize),
    /// Every item has an owner
    Complete,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("cannot allocate an empty receipt")]
    EmptyReceipt,
    #[error("there is no decision to undo")]
    NothingToUndo,
}

/// A receipt being allocated, together with its cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    receipt: Receipt,
    cursor: AllocationCursor,
}

impl Allocation {
    /// Start allocating a freshly parsed receipt from its first item
    pub fn new(receipt: Receipt) -> Result<Self, AllocationError> {
        if receipt.is_empty() {
            return Err(AllocationError::EmptyReceipt);
        }
        Ok(Self {
            receipt,
            cursor: AllocationCursor::default(),
        })
    }

    /// Rebuild an allocation from a checkpoint
    ///
    /// A cursor that no longer fits the receipt is clamped, and a cursor
    /// resting on an assigned item is moved to the next unassigned one.
    pub fn resume(receipt: Receipt, cursor: AllocationCursor) -> Result<Self, AllocationError> {
        if receipt.is_empty() {
            return Err(AllocationError::EmptyReceipt);
        }
        let len = receipt.len();
        let mut allocation = Self {
            receipt,
            cursor: AllocationCursor {
                position: cursor.position.min(len - 1),
                last_touched: cursor.last_touched.filter(|&i| i < len),
            },
        };
        if allocation.current_item().is_assigned() {
            if let Some(next) = allocation.next_index(|item| !item.is_assigned()) {
                allocation.cursor.position = next;
            }
        }
        Ok(allocation)
    }

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn cursor(&self) -> &AllocationCursor {
        &self.cursor
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.receipt.clone(), self.cursor)
    }

    pub fn current_item(&self) -> &LineItem {
        &self.receipt.items[self.cursor.position]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.can_undo()
    }

    /// The current state of the walk
    pub fn step(&self) -> AllocationStep {
        if self.current_item().is_assigned() {
            AllocationStep::Complete
        } else {
            AllocationStep::Prompt(self.cursor.position)
        }
    }

    pub fn apply(&mut self, command: AllocationCommand) -> Result<AllocationStep, AllocationError> {
        match command {
            AllocationCommand::Assign(owner) => self.assign(owner),
            AllocationCommand::Delay => self.delay(),
            AllocationCommand::Undo => self.undo()?,
            AllocationCommand::OverridePrice(price) => self.override_price(price),
            AllocationCommand::Reset => self.reset(),
        }
        debug!(?command, cursor = ?self.cursor, "applied allocation command");
        Ok(self.step())
    }

    /// Assign the current item and move to the next undecided one
    ///
    /// If nothing is left undecided the cursor comes back to the item just
    /// assigned, which [`Allocation::step`] reports as complete.
    pub fn assign(&mut self, owner: Owner) {
        let position = self.cursor.position;
        self.receipt.items[position].owner = Some(owner);
        self.cursor.last_touched = Some(position);
        self.cursor.position = self
            .next_index(|item| !item.is_assigned())
            .unwrap_or(position);
    }

    /// Put off the current item until the other undecided items are done
    pub fn delay(&mut self) {
        if let Some(next) = self.next_index(|item| !item.is_assigned()) {
            self.cursor.position = next;
        }
    }

    /// Revert the most recent assignment
    pub fn undo(&mut self) -> Result<(), AllocationError> {
        let target = self
            .cursor
            .last_touched
            .take()
            .ok_or(AllocationError::NothingToUndo)?;
        self.receipt.items[target].owner = None;
        self.cursor.position = target;
        Ok(())
    }

    /// Correct the price of the current item
    pub fn override_price(&mut self, price: Money) {
        self.receipt.items[self.cursor.position].price = price;
    }

    /// Forget every decision and start again from the first item
    pub fn reset(&mut self) {
        self.receipt.clear_owners();
        self.cursor = AllocationCursor::default();
    }

    /// First index after the cursor, going round at most once, whose item
    /// satisfies `accept`. The lap ends on the cursor itself.
    fn next_index(&self, accept: impl Fn(&LineItem) -> bool) -> Option<usize> {
        let len = self.receipt.len();
        let from = self.cursor.position;
        (1..=len)
            .map(|step| (from + step) % len)
            .find(|&i| accept(&self.receipt.items[i]))
    }
}
