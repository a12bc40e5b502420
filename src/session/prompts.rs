//! Operator-facing message texts

use std::time::Duration;

use crate::models::{LineItem, People, Person, Receipt};
use crate::services::OwnerTotals;

use super::command::{DELAY, NEW_PRICE, NOT_AN_ITEM, RESET, SHARED, UNDO};

pub const GREETING: &str = "Hi.";
pub const FOUND_CHECKPOINT: &str = "I found a previous receipt, let's finish it.";
pub const NOT_UNDERSTOOD: &str = "I can't understand that. Let's try again.";
pub const BAD_PRICE: &str = "I can't understand that price, please try again.";
pub const ASK_STORE_NAME: &str = "Please type in the name of the store.";
pub const EMPTY_STORE_NAME: &str = "Store name cannot be empty.";
pub const MORE_RECEIPTS: &str = "More receipts?";
pub const NOTHING_TO_ABORT: &str = "There is no receipt to abort.";
pub const CHECKPOINT_DELETED: &str = "Checkpoint deleted.";
pub const SHUTTING_DOWN: &str = "My context was cancelled, I'm shutting down.";
pub const GOODBYE: &str = "Cya.";
pub const SENDING_PHOTO: &str = "M'kay, I'm sending this image for processing...";
pub const FORWARDING_FOLLOW_UP: &str = "M'kay, I'm forwarding this follow-up prompt...";

pub fn ask_for_receipt(photos_enabled: bool) -> String {
    if photos_enabled {
        "Let's parse a receipt. Please send it my way. I can understand photographs and text messages."
            .to_string()
    } else {
        "Let's parse a receipt. Please send it my way as a text message.".to_string()
    }
}

pub fn receipt_preview(receipt: &Receipt) -> String {
    format!("Let's parse the following receipt:\n\n{}", receipt)
}

pub fn back_to_beginning(receipt: &Receipt) -> String {
    format!(
        "M'kay, let's go back to the beginning of this receipt:\n\n{}",
        receipt
    )
}

pub fn receipt_item(item: &LineItem, people: &People, can_undo: bool) -> String {
    let hint = if item.hint.is_empty() {
        String::new()
    } else {
        format!("\nNext on the receipt: {}", item.hint)
    };
    let undo = if can_undo {
        format!("\n{} - Undo last decision", UNDO)
    } else {
        String::new()
    };

    format!(
        "{item}{hint}

Please choose the owner:
{a_code} - Set owned by {a_name}
{b_code} - Set owned by {b_name}
{SHARED} - Set owned by both (shared)
{NOT_AN_ITEM} - Not a receipt item
{RESET} - Reset receipt
{NEW_PRICE} <new_price> - Set new price
{DELAY} - Delay item decision{undo}",
        a_code = people.code(Person::A),
        a_name = people.name(Person::A),
        b_code = people.code(Person::B),
        b_name = people.name(Person::B),
    )
}

pub fn owner_choice(people: &People, can_undo: bool) -> String {
    let mut codes = vec![
        people.code(Person::A),
        people.code(Person::B),
        SHARED,
        NOT_AN_ITEM,
        RESET,
        NEW_PRICE,
        DELAY,
    ];
    if can_undo {
        codes.push(UNDO);
    }
    format!("Invalid choice. Choose one of {{{}}}.", codes.join(", "))
}

pub fn payer_choice(totals: &OwnerTotals, people: &People) -> String {
    format!(
        "{a_name}'s total: {a}
{b_name}'s total: {b}
Shared total: {shared}
Total: {total}
Total with discounts: {with_discounts}

Please choose the payer:
{a_code} - {a_name}
{b_code} - {b_name}
{RESET} - Reset receipt",
        a_name = people.name(Person::A),
        b_name = people.name(Person::B),
        a_code = people.code(Person::A),
        b_code = people.code(Person::B),
        a = totals.a,
        b = totals.b,
        shared = totals.shared,
        total = totals.total,
        with_discounts = totals.total_with_discounts,
    )
}

pub fn invalid_payer(people: &People) -> String {
    format!(
        "Invalid choice. Choose one of {{{}, {}, {}}}.",
        people.code(Person::A),
        people.code(Person::B),
        RESET
    )
}

pub fn creating_expense(kind: impl std::fmt::Display) -> String {
    format!("Creating {} expense...", kind)
}

pub fn photo_review(receipt: &Receipt) -> String {
    format!(
        "Here are the items and prices I read:

{receipt}

Check if any items are missing. Fees and discounts should be included.

To continue parsing this receipt, enter y/yes.

To abort this receipt, enter n/no.

To ask for changes in this receipt, just type in a prompt in natural language."
    )
}

pub fn invalid_vision_json(attempt: u32, max_attempts: u32, error: &str, reply: &str) -> String {
    format!(
        "The reply was not valid JSON, retrying ({}/{}).\n\nError: {}\n\nContent:\n\n{}",
        attempt, max_attempts, error, reply
    )
}

pub fn vision_gave_up(max_attempts: u32) -> String {
    format!(
        "The reply was not valid JSON {} times in a row, I'm giving up.",
        max_attempts
    )
}

pub fn uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if hours > 0 {
        format!("I'm up for {}h{}m{}s.", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("I'm up for {}m{}s.", minutes, seconds)
    } else {
        format!("I'm up for {}s.", seconds)
    }
}

pub fn help(people: &People) -> String {
    format!(
        "Send a receipt as text or a photo and I'll walk you through its items.

While choosing owners:
{} / {} - owned by {} / {}
{SHARED} - shared, {NOT_AN_ITEM} - not an item, {DELAY} - delay, {UNDO} - undo
{NEW_PRICE} <price> - set a new price, {RESET} - start over

Any time:
/abort - drop the current receipt
/uptime - how long this session has been running
/finish - end the session",
        people.code(Person::A),
        people.code(Person::B),
        people.name(Person::A),
        people.name(Person::B),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_receipt_item_offers_undo_only_when_possible() {
        let people = People::default();
        let item = LineItem::new("Milk", Money::from_cents(40)).with_hint("Eggs");

        let without = receipt_item(&item, &people, false);
        assert!(without.starts_with("Milk (0.40)\nNext on the receipt: Eggs"));
        assert!(without.contains("a - Set owned by Ana"));
        assert!(without.contains("m - Set owned by Matheus"));
        assert!(!without.contains("Undo"));

        assert!(receipt_item(&item, &people, true).ends_with("u - Undo last decision"));
    }

    #[test]
    fn test_owner_choice() {
        let people = People::default();
        assert_eq!(
            owner_choice(&people, false),
            "Invalid choice. Choose one of {a, m, s, n, r, p, d}."
        );
        assert_eq!(
            owner_choice(&people, true),
            "Invalid choice. Choose one of {a, m, s, n, r, p, d, u}."
        );
    }

    #[test]
    fn test_invalid_payer() {
        assert_eq!(
            invalid_payer(&People::default()),
            "Invalid choice. Choose one of {a, m, r}."
        );
    }

    #[test]
    fn test_payer_choice_lists_totals() {
        let totals = OwnerTotals {
            a: Money::from_cents(500),
            b: Money::from_cents(300),
            shared: Money::from_cents(101),
            total: Money::from_cents(901),
            total_with_discounts: Money::from_cents(901),
        };
        let text = payer_choice(&totals, &People::default());
        assert!(text.starts_with("Ana's total: 5.00\nMatheus's total: 3.00\nShared total: 1.01"));
        assert!(text.ends_with("r - Reset receipt"));
    }

    #[test]
    fn test_uptime() {
        assert_eq!(uptime(Duration::from_secs(5)), "I'm up for 5s.");
        assert_eq!(uptime(Duration::from_secs(65)), "I'm up for 1m5s.");
        assert_eq!(uptime(Duration::from_secs(3725)), "I'm up for 1h2m5s.");
    }
}
