//! Strongly-typed ID wrappers
//!
//! Receipts get an ID when they are parsed; journal entries get one when an
//! expense is recorded. Newtypes keep the two apart at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        /// Short form for logs and messages: prefix plus 8 hex digits
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let simple = self.0.simple().to_string();
                write!(f, "{}{}", $prefix, &simple[..8])
            }
        }
    };
}

define_id!(
    /// Identifies one parsed receipt across checkpoints and exports
    ReceiptId,
    "rcpt-"
);
define_id!(
    /// Identifies one journal entry
    ExpenseId,
    "exp-"
);
