//! Single-line receipts
//!
//! Some retailers' receipts arrive as one long line of text: names and
//! prices interleaved. Price tokens act as item boundaries; the text between
//! two consecutive prices is the name of the item priced by the second one.

use crate::models::LineItem;

use super::price::{is_price_token, parse_price_token};
use super::ParserOptions;

pub(super) fn parse(text: &str, options: &ParserOptions) -> Vec<LineItem> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let price_positions: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| is_price_token(token, options.accept_discounts))
        .map(|(i, _)| i)
        .collect();

    // The first price only closes the leading noise.
    price_positions
        .windows(2)
        .enumerate()
        .map(|(window_index, window)| {
            let (prev, price_at) = (window[0], window[1]);
            let hint_end = price_positions
                .get(window_index + 2)
                .copied()
                .unwrap_or(tokens.len());

            LineItem::new(tokens[prev + 1..price_at].join(" "), parse_price_token(tokens[price_at]))
                .with_hint(tokens[price_at + 1..hint_end].join(" "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(text: &str) -> Vec<LineItem> {
        parse(text, &ParserOptions::default())
    }

    #[test]
    fn test_three_prices_make_two_items() {
        let items = parse_default("Bread 2.00 Milk .40 Eggs 3.5");
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].name, "Milk");
        assert_eq!(items[0].price.cents(), 40);
        assert_eq!(items[0].hint, "Eggs");

        assert_eq!(items[1].name, "Eggs");
        assert_eq!(items[1].price.cents(), 350);
        assert_eq!(items[1].hint, "");
    }

    #[test]
    fn test_trailing_text_becomes_last_hint() {
        let items = parse_default("Total 0.00 Apples 1.99 Pears 2.49 Thank you");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Apples");
        assert_eq!(items[0].hint, "Pears");
        assert_eq!(items[1].name, "Pears");
        assert_eq!(items[1].hint, "Thank you");
    }

    #[test]
    fn test_multi_word_names_and_collapsed_whitespace() {
        let items = parse_default("x 0.00   Whole   Milk 2L  EUR1.09 Oat Drink 1.o9");
        assert_eq!(items[0].name, "Whole Milk 2L");
        assert_eq!(items[0].price.cents(), 109);
        assert_eq!(items[1].name, "Oat Drink");
        assert_eq!(items[1].price.cents(), 109);
    }

    #[test]
    fn test_adjacent_prices_give_empty_name() {
        let items = parse_default("0.00 1.00 2.00");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "");
        assert_eq!(items[0].price.cents(), 100);
    }

    #[test]
    fn test_fewer_than_two_prices_is_empty() {
        assert!(parse_default("").is_empty());
        assert!(parse_default("hello world").is_empty());
        assert!(parse_default("Bread 2.00").is_empty());
    }

    #[test]
    fn test_discount_tokens() {
        let text = "Start 0.00 Wings 3.99 Wings Discount -3.99";
        let with = parse(text, &ParserOptions { accept_discounts: true });
        assert_eq!(with.len(), 2);
        assert_eq!(with[1].price.cents(), -399);

        let without = parse(text, &ParserOptions { accept_discounts: false });
        assert_eq!(without.len(), 1);
        assert_eq!(without[0].hint, "Wings Discount -3.99");
    }
}
