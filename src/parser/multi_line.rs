//! List-shaped receipts
//!
//! Copying a receipt out of some apps yields every item name first and
//! every price afterwards, one per line. Some layouts add lines holding a
//! lone `*`, which carry no information.

use tracing::debug;

use crate::models::{LineItem, Money};

use super::price::{is_price_token, parse_amount, parse_price_token};
use super::ParserOptions;

pub(super) fn parse(text: &str, options: &ParserOptions) -> Vec<LineItem> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !is_single_asterisk(line))
        .collect();

    let n = lines.len() / 2;
    (0..n)
        .map(|i| LineItem::new(lines[i].trim(), price_line(lines[i + n], options)))
        .collect()
}

fn is_single_asterisk(line: &str) -> bool {
    line.trim() == "*"
}

/// Read a price line, degrading to zero when it does not look like a price
fn price_line(line: &str, options: &ParserOptions) -> Money {
    let line = line.trim();
    if !options.accept_discounts && line.starts_with('-') {
        debug!(line, "negative price with discounts disabled, using zero");
        return Money::zero();
    }
    if is_price_token(line, options.accept_discounts) {
        return parse_price_token(line);
    }
    parse_amount(line).unwrap_or_else(|| {
        debug!(line, "unreadable price line, using zero");
        Money::zero()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(text: &str) -> Vec<LineItem> {
        parse(text, &ParserOptions::default())
    }

    #[test]
    fn test_names_then_prices() {
        let items = parse_default("Bread\nMilk\n2.00\n1.40");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], LineItem::new("Bread", Money::from_cents(200)));
        assert_eq!(items[1], LineItem::new("Milk", Money::from_cents(140)));
    }

    #[test]
    fn test_asterisk_lines_are_removed() {
        let items = parse_default("Bread\n *\nMilk\n2.00\n*\n1.40\n  *  ");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "Milk");
        assert_eq!(items[1].price.cents(), 140);
    }

    #[test]
    fn test_unpaired_line_is_dropped() {
        let items = parse_default("Bread\nMilk\n2.00\n1.40\nleftover");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price.cents(), 200);
        assert_eq!(items[1].price.cents(), 140);
    }

    #[test]
    fn test_whole_amounts_and_garbage() {
        let items = parse_default("Bread\nMilk\n2\nabc");
        assert_eq!(items[0].price.cents(), 200);
        assert_eq!(items[1].price.cents(), 0);
    }

    #[test]
    fn test_negative_prices_follow_discount_option() {
        let text = "Wings\nDiscount\n3.99\n-3.99";
        assert_eq!(parse(text, &ParserOptions { accept_discounts: true })[1].price.cents(), -399);
        assert_eq!(parse(text, &ParserOptions { accept_discounts: false })[1].price.cents(), 0);
    }
}
