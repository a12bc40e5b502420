//! Service layer
//!
//! The allocation state machine and the settlement calculator. Both are
//! pure: persistence and messaging belong to the session driver.

pub mod allocation;
pub mod settlement;

pub use allocation::{Allocation, AllocationCommand, AllocationError, AllocationStep};
pub use settlement::{settle, DiscountPolicy, OwnerTotals, Settlement};
