mod aggregate;
mod donation;
#[cfg(test)]
mod tests;

pub use aggregate::NonProfitAggregate;
pub use donation::DonationRecord;

/// Column order of an uploaded donation export.
pub const DONATION_COLUMNS: [&str; 6] = ["date", "orderId", "nonProfit", "donationCurrency", "donationAmount", "fee"];
