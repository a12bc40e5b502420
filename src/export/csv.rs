//! CSV export of receipt items
//!
//! One row per item, in receipt order. Prices are written as decimal euros,
//! owners by their display label (empty while unassigned).

use std::io::Write;

use crate::error::{SplitterError, SplitterResult};
use crate::models::{People, Receipt};

/// Export the items of a receipt to CSV
pub fn export_items_csv<W: Write>(
    receipt: &Receipt,
    people: &People,
    writer: W,
) -> SplitterResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["Index", "Name", "Price", "Owner"])
        .map_err(|e| SplitterError::Export(e.to_string()))?;

    for (index, item) in receipt.items.iter().enumerate() {
        let owner = item
            .owner
            .map(|owner| people.owner_label(owner))
            .unwrap_or_default();
        csv.write_record([
            (index + 1).to_string(),
            item.name.clone(),
            item.price.to_string(),
            owner,
        ])
        .map_err(|e| SplitterError::Export(e.to_string()))?;
    }

    csv.flush().map_err(|e| SplitterError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Money, Owner};

    #[test]
    fn test_export_items_csv() {
        let mut receipt = Receipt::new(vec![
            LineItem::new("Bread, sliced", Money::from_cents(200)),
            LineItem::new("Milk", Money::from_cents(-40)),
        ]);
        receipt.items[0].owner = Some(Owner::PersonB);

        let mut output = Vec::new();
        export_items_csv(&receipt, &People::default(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Index,Name,Price,Owner");
        assert_eq!(lines[1], "1,\"Bread, sliced\",2.00,Matheus");
        assert_eq!(lines[2], "2,Milk,-0.40,");
    }
}
