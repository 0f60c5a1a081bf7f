use crate::models::{DonationRecord, NonProfitAggregate};
use crate::types::{parse_amount, RateTable};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Folds donation records into per non-profit totals in the base currency.
///
/// A record contributes only when its non-profit is named and its currency has a usable rate; a
/// zero rate counts as missing. Everything else is dropped silently. Amounts that fail to parse
/// count as zero.
pub struct Aggregator<'a> {
    rates: &'a RateTable,
    index: HashMap<String, usize>,
    aggregates: Vec<NonProfitAggregate>,
    skipped: usize
}

impl<'a> Aggregator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self {
            rates,
            index: HashMap::new(),
            aggregates: Vec::new(),
            skipped: 0
        }
    }

    /// Aggregates `records` in one pass. Output keeps first-seen non-profit order.
    pub fn aggregate(rates: &RateTable, records: &[DonationRecord]) -> Vec<NonProfitAggregate> {
        let mut aggregator = Aggregator::new(rates);

        for record in records {
            aggregator.accept(record);
        }

        aggregator.finish()
    }

    /// Folds a single record. Returns whether it contributed to a total.
    pub fn accept(&mut self, record: &DonationRecord) -> bool {
        if record.non_profit.is_empty() || self.rates.rate(&record.donation_currency).is_none() {
            self.skipped += 1;
            return false;
        }

        let currency = record.donation_currency.as_str();
        let amount = self.rates.convert(amount_or_zero(&record.donation_amount, record, "amount"), currency);
        let fee = self.rates.convert(amount_or_zero(&record.fee, record, "fee"), currency);

        let position = match self.index.get(&record.non_profit) {
            Some(position) => *position,
            None => {
                self.aggregates.push(NonProfitAggregate::new(record.non_profit.as_str()));
                self.index.insert(record.non_profit.clone(), self.aggregates.len() - 1);
                self.aggregates.len() - 1
            }
        };

        self.aggregates[position].record(amount, fee);

        true
    }

    /// Rounds every total and hands the aggregates out.
    pub fn finish(self) -> Vec<NonProfitAggregate> {
        debug!("Aggregated {} non-profits, skipped {} records", self.aggregates.len(), self.skipped);

        self.aggregates.into_iter().map(NonProfitAggregate::finalize).collect()
    }
}

fn amount_or_zero(value: &str, record: &DonationRecord, column: &str) -> Decimal {
    parse_amount(value).unwrap_or_else(|error| {
        warn!("Order [{}] for [{}] has an unusable {column}, counting it as zero: {error}", record.order_id, record.non_profit);
        Decimal::ZERO
    })
}
