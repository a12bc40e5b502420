//! Settlement calculator
//!
//! Turns a fully allocated receipt and the payer's identity into the two
//! ledger transactions: the borrower reimbursing the payer for the
//! borrower's own items, and the shared items split in half.

use serde::{Deserialize, Serialize};

use crate::models::{
    ExpenseKind, ExpenseRecord, Money, Owner, People, Person, Receipt, UserShare,
};

/// How negative (discount) lines count towards owner totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountPolicy {
    /// Discounts reduce the total of whoever owns them
    #[default]
    Include,
    /// Discount lines are ignored
    Exclude,
}

impl DiscountPolicy {
    fn counts(&self, price: Money) -> bool {
        match self {
            Self::Include => true,
            Self::Exclude => !price.is_negative(),
        }
    }
}

/// Per-owner totals of a receipt
///
/// Items marked as not being items never count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OwnerTotals {
    pub a: Money,
    pub b: Money,
    pub shared: Money,
    /// Sum of the non-negative prices
    pub total: Money,
    /// Sum of every price, discounts included
    pub total_with_discounts: Money,
}

impl OwnerTotals {
    pub fn compute(receipt: &Receipt, policy: DiscountPolicy) -> Self {
        let mut totals = Self::default();
        for item in &receipt.items {
            let Some(owner) = item.owner.filter(Owner::is_settled) else {
                continue;
            };

            totals.total_with_discounts += item.price;
            if !item.price.is_negative() {
                totals.total += item.price;
            }
            if !policy.counts(item.price) {
                continue;
            }
            match owner {
                Owner::PersonA => totals.a += item.price,
                Owner::PersonB => totals.b += item.price,
                Owner::Shared => totals.shared += item.price,
                Owner::NotAnItem => {}
            }
        }
        totals
    }

    /// Total of one person's own items
    pub fn of(&self, person: Person) -> Money {
        match person {
            Person::A => self.a,
            Person::B => self.b,
        }
    }
}

/// The two transactions settling one receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub non_shared: ExpenseRecord,
    pub shared: ExpenseRecord,
}

impl Settlement {
    pub fn records(&self) -> [&ExpenseRecord; 2] {
        [&self.non_shared, &self.shared]
    }
}

/// Compute the settlement for a receipt paid by `payer`
pub fn settle(
    receipt: &Receipt,
    payer: Person,
    policy: DiscountPolicy,
    people: &People,
) -> Settlement {
    let totals = OwnerTotals::compute(receipt, policy);
    let borrower = payer.other();

    let cost = totals.of(borrower);
    let non_shared = ExpenseRecord {
        kind: ExpenseKind::NonShared,
        cost,
        payer,
        share_a: UserShare::default(),
        share_b: UserShare::default(),
        description: format!("{}'s items", people.name(borrower)),
    }
    .with_share(payer, UserShare::new(cost, Money::zero()))
    .with_share(borrower, UserShare::new(Money::zero(), cost));

    let cost = totals.shared;
    let (payer_half, borrower_half) = cost.split_half();
    let shared = ExpenseRecord {
        kind: ExpenseKind::Shared,
        cost,
        payer,
        share_a: UserShare::default(),
        share_b: UserShare::default(),
        description: "shared".to_string(),
    }
    .with_share(payer, UserShare::new(cost, payer_half))
    .with_share(borrower, UserShare::new(Money::zero(), borrower_half));

    Settlement { non_shared, shared }
}
