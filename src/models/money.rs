//! Money type for receipt amounts
//!
//! Amounts are whole cents in an `i64`, so every total, split and settlement
//! is exact integer arithmetic. Negative amounts are discount lines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

/// Largest absolute price one receipt line may carry
///
/// Ten million units keeps any realistic sum of lines far from `i64` limits.
pub const MAX_LINE_PRICE: Money = Money(1_000_000_000);

impl Money {
    /// # Examples
    /// ```
    /// use receipt_splitter::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether the amount is usable as the price of a single line
    pub const fn fits_line_limit(&self) -> bool {
        self.0.unsigned_abs() <= MAX_LINE_PRICE.0.unsigned_abs()
    }

    /// Render with a currency symbol, e.g. `€12.50` or `-€0.40`
    ///
    /// Codes without a well-known symbol are written out: `BRL 12.50`.
    pub fn format_with_symbol(&self, currency_code: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = Self(self.0.saturating_abs());
        match currency_code.trim().to_uppercase().as_str() {
            "EUR" => format!("{sign}€{abs}"),
            "USD" => format!("{sign}${abs}"),
            "GBP" => format!("{sign}£{abs}"),
            "" => self.to_string(),
            code => format!("{sign}{code} {abs}"),
        }
    }

    /// Split into a floor half and the remainder
    ///
    /// The parts always add up to `self`; an odd cent goes to the second.
    pub const fn split_half(&self) -> (Self, Self) {
        let floor = self.0.div_euclid(2);
        (Self(floor), Self(self.0 - floor))
    }
}

/// Decimal form with two places, e.g. `-0.40`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}
