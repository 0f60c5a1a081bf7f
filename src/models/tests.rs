use super::{DonationRecord, NonProfitAggregate};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use csv::StringRecord;
use rust_decimal::Decimal;

#[test]
fn test_record_maps_columns_in_fixed_order() -> Result<()> {
    let row = StringRecord::from(vec!["2019-01-01", "ORD-1", "Red Cross", "USD", "1,000.00", "25.5"]);
    let record = DonationRecord::from_row(&row).ok_or_else(|| anyhow!("row should map to a record"))?;

    assert_eq!(record.date, "2019-01-01");
    assert_eq!(record.order_id, "ORD-1");
    assert_eq!(record.non_profit, "Red Cross");
    assert_eq!(record.donation_currency, "USD");
    assert_eq!(record.donation_amount, "1,000.00");
    assert_eq!(record.fee, "25.5");

    Ok(())
}

#[test]
fn test_record_rejects_short_rows_and_ignores_extra_fields() -> Result<()> {
    let short = StringRecord::from(vec!["2019-01-01", "ORD-1", "Red Cross", "USD", "10"]);
    assert!(DonationRecord::from_row(&short).is_none());

    let long = StringRecord::from(vec!["2019-01-01", "ORD-1", "Red Cross", "USD", "10", "1", "extra"]);
    let record = DonationRecord::from_row(&long).ok_or_else(|| anyhow!("long row should still map"))?;
    assert_eq!(record.fee, "1");

    Ok(())
}

#[test]
fn test_aggregate_accumulates_and_counts() -> Result<()> {
    let mut aggregate = NonProfitAggregate::new("A");
    aggregate.record(Decimal::from(50), Decimal::from_str("2.5")?);
    aggregate.record(Decimal::from(25), Decimal::ONE);

    assert_eq!(aggregate.total_amount, Decimal::from(75));
    assert_eq!(aggregate.total_fee, Decimal::from_str("3.5")?);
    assert_eq!(aggregate.total_donations, 2);

    Ok(())
}

#[test]
fn test_aggregate_rounds_only_when_finalized() -> Result<()> {
    let mut aggregate = NonProfitAggregate::new("A");
    aggregate.record(Decimal::from_str("0.004")?, Decimal::ZERO);
    aggregate.record(Decimal::from_str("0.004")?, Decimal::ZERO);

    assert_eq!(aggregate.total_amount, Decimal::from_str("0.008")?);

    let finalized = aggregate.finalize();

    assert_eq!(finalized.total_amount, Decimal::from_str("0.01")?);
    assert_eq!(finalized.non_profit, "A");
    assert_eq!(finalized.total_donations, 2);

    Ok(())
}
