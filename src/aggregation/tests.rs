use super::Aggregator;
use crate::models::DonationRecord;
use crate::types::RateTable;

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

fn create_record(non_profit: &str, currency: &str, amount: &str, fee: &str) -> DonationRecord {
    DonationRecord {
        date: "01/01/2019".to_string(),
        order_id: "1".to_string(),
        non_profit: non_profit.to_string(),
        donation_currency: currency.to_string(),
        donation_amount: amount.to_string(),
        fee: fee.to_string()
    }
}

fn create_rates(entries: &[(&str, &str)]) -> Result<RateTable> {
    entries.iter()
        .map(|(currency, rate)| -> Result<(String, Decimal)> { Ok((currency.to_string(), Decimal::from_str(rate)?)) })
        .collect()
}

#[test]
fn test_aggregator_converts_and_sums_per_non_profit() -> Result<()> {
    let rates = create_rates(&[("USD", "2")])?;
    let records = vec![
        create_record("A", "USD", "100", "5"),
        create_record("A", "USD", "50", "2"),
    ];

    let aggregates = Aggregator::aggregate(&rates, &records);

    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].non_profit, "A");
    assert_eq!(aggregates[0].total_amount, Decimal::from_str("75.00")?);
    assert_eq!(aggregates[0].total_fee, Decimal::from_str("3.50")?);
    assert_eq!(aggregates[0].total_donations, 2);

    Ok(())
}

#[test]
fn test_aggregator_excludes_records_without_non_profit() -> Result<()> {
    let rates = create_rates(&[("USD", "1")])?;
    let records = vec![
        create_record("", "USD", "100", "5"),
        create_record("B", "USD", "10", "1"),
    ];

    let aggregates = Aggregator::aggregate(&rates, &records);

    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].non_profit, "B");
    assert_eq!(aggregates[0].total_donations, 1);

    Ok(())
}

#[test]
fn test_aggregator_drops_unknown_and_empty_currencies() -> Result<()> {
    let rates = create_rates(&[("USD", "1")])?;
    let records = vec![
        create_record("A", "XYZ", "100", "5"),
        create_record("A", "", "100", "5"),
        create_record("A", "USD", "10", "1"),
    ];

    let aggregates = Aggregator::aggregate(&rates, &records);

    assert_eq!(aggregates[0].total_amount, Decimal::from(10));
    assert_eq!(aggregates[0].total_donations, 1);

    Ok(())
}

#[test]
fn test_aggregator_drops_zero_rate_records() -> Result<()> {
    let rates = create_rates(&[("EUR", "1"), ("ZZZ", "0")])?;
    let records = vec![
        create_record("A", "EUR", "10", "1"),
        create_record("A", "ZZZ", "1000", "50"),
        create_record("B", "ZZZ", "12.34", "0.5"),
    ];

    let aggregates = Aggregator::aggregate(&rates, &records);

    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].total_amount, Decimal::from(10));
    assert_eq!(aggregates[0].total_fee, Decimal::ONE);
    assert_eq!(aggregates[0].total_donations, 1);

    Ok(())
}

#[test]
fn test_aggregator_strips_thousands_separators_and_zeroes_garbage() -> Result<()> {
    let rates = create_rates(&[("EUR", "0.5")])?;
    let records = vec![
        create_record("A", "EUR", "1,000.00", "n/a"),
        create_record("A", "EUR", "oops", "2"),
    ];

    let aggregates = Aggregator::aggregate(&rates, &records);

    assert_eq!(aggregates[0].total_amount, Decimal::from(2000));
    assert_eq!(aggregates[0].total_fee, Decimal::from(4));
    assert_eq!(aggregates[0].total_donations, 2);

    Ok(())
}

#[test]
fn test_aggregator_preserves_first_seen_order_and_rounds_totals() -> Result<()> {
    let rates = create_rates(&[("USD", "1"), ("GBP", "3")])?;
    let records = vec![
        create_record("Zeta", "USD", "1", "0"),
        create_record("Alpha", "GBP", "100", "1"),
        create_record("Zeta", "USD", "2", "0"),
        create_record("Mid", "USD", "0.005", "0"),
    ];

    let aggregates = Aggregator::aggregate(&rates, &records);
    let names: Vec<&str> = aggregates.iter().map(|aggregate| aggregate.non_profit.as_str()).collect();

    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    assert_eq!(aggregates[1].total_amount, Decimal::from_str("33.33")?);
    assert_eq!(aggregates[1].total_fee, Decimal::from_str("0.33")?);
    assert_eq!(aggregates[2].total_amount, Decimal::from_str("0.01")?);

    Ok(())
}

#[test]
fn test_aggregator_donation_count_matches_eligible_records() -> Result<()> {
    let rates = create_rates(&[("USD", "1"), ("EUR", "0.9")])?;
    let records = vec![
        create_record("A", "USD", "1", "0"),
        create_record("B", "EUR", "1", "0"),
        create_record("", "EUR", "1", "0"),
        create_record("C", "JPY", "1", "0"),
        create_record("A", "EUR", "1", "0"),
        create_record("Nonprofit", "Donation Currency", "Donation Amount", "Fee"),
    ];

    let eligible = records.iter()
        .filter(|record| !record.non_profit.is_empty() && rates.rate(&record.donation_currency).is_some())
        .count();
    let total: u64 = Aggregator::aggregate(&rates, &records).iter().map(|aggregate| aggregate.total_donations).sum();

    assert_eq!(total, eligible as u64);
    assert_eq!(total, 3);

    Ok(())
}

#[test]
fn test_aggregator_reports_whether_a_record_contributed() -> Result<()> {
    let rates = create_rates(&[("USD", "1")])?;
    let mut aggregator = Aggregator::new(&rates);

    assert!(aggregator.accept(&create_record("A", "USD", "1", "0")));
    assert!(!aggregator.accept(&create_record("A", "CAD", "1", "0")));
    assert_eq!(aggregator.finish().len(), 1);

    Ok(())
}

#[test]
fn test_aggregator_returns_nothing_for_no_records() -> Result<()> {
    let rates = create_rates(&[("USD", "1")])?;

    assert!(Aggregator::aggregate(&rates, &[]).is_empty());

    Ok(())
}
