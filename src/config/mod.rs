//! Configuration: path resolution and persisted user settings

pub mod paths;
pub mod settings;

pub use paths::SplitterPaths;
pub use settings::{LedgerBackend, Settings, TimeoutScheme};
