//! Storage layer
//!
//! Atomic JSON file helpers and the file-backed checkpoint store.

pub mod checkpoint;
pub mod file_io;

pub use checkpoint::FileCheckpointStore;
pub use file_io::{read_json_optional, remove_if_exists, write_json_atomic};
