//! Receipt display formatting
//!
//! Formats receipts for terminal output as a table with owner totals.

use crate::models::{Checkpoint, People, Person, Receipt};
use crate::services::OwnerTotals;

/// Format a receipt as a table of items
pub fn format_receipt_table(receipt: &Receipt, people: &People) -> String {
    if receipt.is_empty() {
        return "No items found.".to_string();
    }

    let name_width = receipt
        .items
        .iter()
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<name_width$}  {:>10}  {}\n",
        "#",
        "Name",
        "Price",
        "Owner",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->3}  {:-<name_width$}  {:->10}  {:-<10}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (index, item) in receipt.items.iter().enumerate() {
        let owner = item
            .owner
            .map(|owner| people.owner_label(owner))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:>3}  {:<name_width$}  {:>10}  {}\n",
            index + 1,
            item.name,
            item.price.to_string(),
            owner,
            name_width = name_width,
        ));
    }

    output
}

/// Format owner totals, one per line
pub fn format_totals(totals: &OwnerTotals, people: &People) -> String {
    let label_width = [
        people.name(Person::A).chars().count(),
        people.name(Person::B).chars().count(),
        "Total with discounts".len(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    let rows = [
        (people.name(Person::A).to_string(), totals.a),
        (people.name(Person::B).to_string(), totals.b),
        ("Shared".to_string(), totals.shared),
        ("Total".to_string(), totals.total),
        ("Total with discounts".to_string(), totals.total_with_discounts),
    ];

    rows.iter()
        .map(|(label, amount)| {
            format!(
                "{:<label_width$}  {:>10}\n",
                label,
                amount.to_string(),
                label_width = label_width
            )
        })
        .collect()
}

/// Format a saved checkpoint: progress, current item and the table
pub fn format_checkpoint(checkpoint: &Checkpoint, people: &People) -> String {
    let receipt = &checkpoint.receipt;
    let decided = receipt.len() - receipt.unassigned_count();

    let mut output = String::new();
    output.push_str(&format!("Receipt: {}\n", receipt.id));
    output.push_str(&format!("  Saved:    {}\n", checkpoint.saved_at.format("%Y-%m-%d %H:%M:%S")));
    output.push_str(&format!("  Progress: {}/{} items decided\n", decided, receipt.len()));
    if let Some(item) = receipt.get(checkpoint.cursor.position) {
        output.push_str(&format!("  Current:  {}\n", item));
    }
    output.push('\n');
    output.push_str(&format_receipt_table(receipt, people));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationCursor, LineItem, Money, Owner};
    use crate::services::DiscountPolicy;

    fn receipt() -> Receipt {
        let mut receipt = Receipt::new(vec![
            LineItem::new("Bread", Money::from_cents(200)),
            LineItem::new("Orange juice", Money::from_cents(1099)),
        ]);
        receipt.items[1].owner = Some(Owner::Shared);
        receipt
    }

    #[test]
    fn test_format_receipt_table() {
        let table = format_receipt_table(&receipt(), &People::default());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Name"));
        assert!(lines[2].starts_with("  1  Bread"));
        assert!(lines[2].ends_with("2.00  -"));
        assert!(lines[3].ends_with("10.99  shared"));
    }

    #[test]
    fn test_empty_receipt() {
        assert_eq!(
            format_receipt_table(&Receipt::new(Vec::new()), &People::default()),
            "No items found."
        );
    }

    #[test]
    fn test_format_totals() {
        let totals = OwnerTotals::compute(&receipt(), DiscountPolicy::Include);
        let text = format_totals(&totals, &People::default());

        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(2).unwrap().ends_with("10.99"));
        assert!(text.lines().nth(3).unwrap().starts_with("Total "));
    }

    #[test]
    fn test_format_checkpoint() {
        let checkpoint = Checkpoint::new(receipt(), AllocationCursor::at(0));
        let text = format_checkpoint(&checkpoint, &People::default());

        assert!(text.contains("Progress: 1/2 items decided"));
        assert!(text.contains("Current:  Bread (2.00)"));
    }
}
