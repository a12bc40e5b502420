//! Price-token grammar
//!
//! A price token is an optional `-`, an optional currency prefix (a
//! three-letter code such as `EUR` or one of `€ $ £`), integer digits
//! (possibly none), a decimal point and one or two fractional digits.
//! OCR commonly reads `0` as `o`/`O`, so those letters count as zeros.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::models::Money;

const CURRENCY_PREFIX: &str = r"(?:[A-Z]{3}|[€$£])?";
const DIGITS: &str = "[0-9oO]";

fn price_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"^(-)?{CURRENCY_PREFIX}({DIGITS}*)\.({DIGITS}{{1,2}})$");
        Regex::new(&pattern).expect("hardcoded regex should be valid")
    })
}

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"^(-)?{CURRENCY_PREFIX}({DIGITS}*)(?:\.({DIGITS}{{1,2}}))?$");
        Regex::new(&pattern).expect("hardcoded regex should be valid")
    })
}

/// Check whether a token matches the price-token grammar
///
/// Negative tokens only match when `accept_discounts` is set.
pub fn is_price_token(token: &str, accept_discounts: bool) -> bool {
    match price_token_regex().captures(token) {
        Some(caps) => accept_discounts || caps.get(1).is_none(),
        None => false,
    }
}

/// Parse a price token into money
///
/// Never fails: a token outside the grammar degrades to zero.
pub fn parse_price_token(token: &str) -> Money {
    let token = token.trim();
    match price_token_regex().captures(token) {
        Some(caps) => money_from_captures(&caps).unwrap_or_else(|| {
            debug!(token, "price token out of range, using zero");
            Money::zero()
        }),
        None => {
            debug!(token, "not a price token, using zero");
            Money::zero()
        }
    }
}

/// Parse an operator-typed amount
///
/// Accepts everything [`parse_price_token`] does plus whole amounts without
/// a decimal point (`4`, `-4`). Returns `None` when nothing sensible can be
/// read.
pub fn parse_amount(input: &str) -> Option<Money> {
    let input = input.trim().to_uppercase();
    let caps = amount_regex().captures(&input)?;
    let has_digits = caps.get(2).is_some_and(|m| !m.as_str().is_empty())
        || caps.get(3).is_some_and(|m| !m.as_str().is_empty());
    if !has_digits {
        return None;
    }
    money_from_captures(&caps)
}

fn money_from_captures(caps: &Captures<'_>) -> Option<Money> {
    let negative = caps.get(1).is_some();
    let units_str = caps.get(2).map_or("", |m| m.as_str());
    let cents_str = caps.get(3).map_or("", |m| m.as_str());

    let units = parse_digits(units_str)?;
    let cents = match cents_str.len() {
        0 => 0,
        1 => parse_digits(cents_str)? * 10,
        _ => parse_digits(cents_str)?,
    };

    let total = units.checked_mul(100)?.checked_add(cents)?;
    let money = Money::from_cents(if negative { -total } else { total });
    money.fits_line_limit().then_some(money)
}

/// Parse OCR-tolerant digits; the empty string is zero
fn parse_digits(digits: &str) -> Option<i64> {
    if digits.is_empty() {
        return Some(0);
    }
    digits.replace(['o', 'O'], "0").parse().ok()
}
