//! YAML export of a receipt

use std::io::Write;

use crate::error::{SplitterError, SplitterResult};
use crate::export::json::ReceiptExport;
use crate::models::Receipt;
use crate::services::DiscountPolicy;

/// Export a receipt to YAML, with a short comment header
pub fn export_receipt_yaml<W: Write>(
    receipt: &Receipt,
    policy: DiscountPolicy,
    writer: &mut W,
) -> SplitterResult<()> {
    let export = ReceiptExport::new(receipt, policy);

    writeln!(writer, "# receipt-splitter receipt export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| SplitterError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SplitterError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export
pub fn import_from_yaml(yaml_str: &str) -> SplitterResult<ReceiptExport> {
    serde_yaml::from_str(yaml_str).map_err(|e| SplitterError::Export(e.to_string()))
}
