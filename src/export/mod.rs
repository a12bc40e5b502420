//! Receipt export
//!
//! - CSV: one row per item (spreadsheet-compatible)
//! - JSON: the receipt and its totals, machine-readable
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_items_csv;
pub use json::{export_receipt_json, ReceiptExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_receipt_yaml;
