use rust_decimal::Decimal;

use crate::types::round_total;

/// Running totals for one non-profit.
///
/// Totals accumulate at full precision while records are folded in and are only rounded by
/// [`NonProfitAggregate::finalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonProfitAggregate {
    pub non_profit: String,
    /// Sum of converted donation amounts, in the base currency.
    pub total_amount: Decimal,
    /// Sum of converted fees, in the base currency.
    pub total_fee: Decimal,
    pub total_donations: u64
}

impl NonProfitAggregate {
    pub fn new(non_profit: impl Into<String>) -> Self {
        Self {
            non_profit: non_profit.into(),
            total_amount: Decimal::ZERO,
            total_fee: Decimal::ZERO,
            total_donations: 0
        }
    }

    /// Adds one already converted donation.
    ///
    /// Overflowing sums saturate instead of panicking; with realistic amounts this never triggers.
    pub fn record(&mut self, amount: Decimal, fee: Decimal) {
        self.total_amount = self.total_amount.saturating_add(amount);
        self.total_fee = self.total_fee.saturating_add(fee);
        self.total_donations += 1;
    }

    /// Rounds both totals to two decimal places.
    pub fn finalize(self) -> Self {
        Self {
            total_amount: round_total(self.total_amount),
            total_fee: round_total(self.total_fee),
            ..self
        }
    }
}
