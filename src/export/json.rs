//! JSON export of a receipt
//!
//! The export carries the receipt with any owners assigned so far, plus the
//! owner totals, under a schema version.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{SplitterError, SplitterResult};
use crate::models::{Money, Receipt};
use crate::services::{DiscountPolicy, OwnerTotals};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub receipt: Receipt,

    pub totals: ExportTotals,
}

/// Owner totals, in cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTotals {
    pub item_count: usize,
    pub unassigned_count: usize,
    pub person_a: Money,
    pub person_b: Money,
    pub shared: Money,
    pub total: Money,
    pub total_with_discounts: Money,
}

impl ReceiptExport {
    pub fn new(receipt: &Receipt, policy: DiscountPolicy) -> Self {
        let totals = OwnerTotals::compute(receipt, policy);
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            receipt: receipt.clone(),
            totals: ExportTotals {
                item_count: receipt.len(),
                unassigned_count: receipt.unassigned_count(),
                person_a: totals.a,
                person_b: totals.b,
                shared: totals.shared,
                total: totals.total,
                total_with_discounts: totals.total_with_discounts,
            },
        }
    }
}

/// Export a receipt to JSON
pub fn export_receipt_json<W: Write>(
    receipt: &Receipt,
    policy: DiscountPolicy,
    writer: &mut W,
    pretty: bool,
) -> SplitterResult<()> {
    let export = ReceiptExport::new(receipt, policy);

    let written = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    };
    written.map_err(|e| SplitterError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SplitterError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Owner};

    fn receipt() -> Receipt {
        let mut receipt = Receipt::new(vec![
            LineItem::new("Bread", Money::from_cents(200)),
            LineItem::new("Milk", Money::from_cents(140)),
        ]);
        receipt.items[0].owner = Some(Owner::Shared);
        receipt
    }

    #[test]
    fn test_json_export() {
        let mut output = Vec::new();
        export_receipt_json(&receipt(), DiscountPolicy::Include, &mut output, true).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\"schema_version\": \"1.0.0\""));
        assert!(text.contains("\"Bread\""));

        let parsed: ReceiptExport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.receipt.items.len(), 2);
        assert_eq!(parsed.totals.unassigned_count, 1);
        assert_eq!(parsed.totals.shared.cents(), 200);
    }

    #[test]
    fn test_compact_json_is_one_line() {
        let mut output = Vec::new();
        export_receipt_json(&receipt(), DiscountPolicy::Include, &mut output, false).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
