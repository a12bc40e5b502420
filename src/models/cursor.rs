//! Allocation cursor
//!
//! Tracks which item is being shown to the operator and which item was
//! assigned most recently (the only undo target).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationCursor {
    /// Index of the item currently presented
    pub position: usize,

    /// Index whose owner was set by the latest assignment, if undo is still
    /// available
    #[serde(default)]
    pub last_touched: Option<usize>,
}

impl AllocationCursor {
    pub fn at(position: usize) -> Self {
        Self {
            position,
            last_touched: None,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.last_touched.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cursor() {
        let cursor = AllocationCursor::default();
        assert_eq!(cursor.position, 0);
        assert!(!cursor.can_undo());
    }

    #[test]
    fn test_missing_last_touched_deserializes() {
        let cursor: AllocationCursor = serde_json::from_str(r#"{"position": 3}"#).unwrap();
        assert_eq!(cursor, AllocationCursor::at(3));
    }
}
