//! Expense journal display formatting

use crate::ledger::JournalEntry;
use crate::models::People;

/// Format journal entries as a table, newest last
pub fn format_journal(entries: &[JournalEntry], people: &People, currency_code: &str) -> String {
    if entries.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let store_width = entries
        .iter()
        .map(|entry| entry.store.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16}  {:<store_width$}  {:<10}  {:>10}  {:<8}  {}\n",
        "Recorded",
        "Store",
        "Kind",
        "Cost",
        "Paid by",
        "Description",
        store_width = store_width,
    ));
    output.push_str(&format!(
        "{:-<16}  {:-<store_width$}  {:-<10}  {:->10}  {:-<8}  {:-<11}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        store_width = store_width,
    ));

    for entry in entries {
        output.push_str(&format!(
            "{:<16}  {:<store_width$}  {:<10}  {:>10}  {:<8}  {}\n",
            entry.recorded_at.format("%Y-%m-%d %H:%M").to_string(),
            entry.store,
            entry.expense.kind.to_string(),
            entry.expense.cost.format_with_symbol(currency_code),
            people.name(entry.expense.payer),
            entry.expense.description,
            store_width = store_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseKind, ExpenseRecord, Money, Person, UserShare};

    #[test]
    fn test_format_journal() {
        let cost = Money::from_cents(300);
        let entry = JournalEntry::new(
            "Lidl",
            ExpenseRecord {
                kind: ExpenseKind::NonShared,
                cost,
                payer: Person::A,
                share_a: UserShare::new(cost, Money::zero()),
                share_b: UserShare::new(Money::zero(), cost),
                description: "Matheus's items".to_string(),
            },
        );

        let text = format_journal(&[entry], &People::default(), "EUR");
        let row = text.lines().nth(2).unwrap();
        assert!(row.contains("Lidl"));
        assert!(row.contains("non-shared"));
        assert!(row.contains("€3.00"));
        assert!(row.ends_with(&format!("{:<8}  Matheus's items", "Ana")));
    }

    #[test]
    fn test_empty_journal() {
        assert_eq!(format_journal(&[], &People::default(), "EUR"), "No expenses recorded.");
    }
}
