use csv::StringRecord;

/// Represents a single row from the uploaded donations CSV.
///
/// All fields are kept verbatim. Amounts stay as strings because exports frequently carry
/// thousands separators, which are only stripped when the row is aggregated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationRecord {
    pub date: String,
    pub order_id: String,
    /// Name of the receiving non-profit; the aggregation key.
    pub non_profit: String,
    /// Currency code the donation was made in.
    pub donation_currency: String,
    pub donation_amount: String,
    pub fee: String
}

impl DonationRecord {
    /// Builds a record from a CSV row in fixed column order.
    ///
    /// Returns `None` when the row has fewer than six fields. Extra trailing fields are ignored.
    pub fn from_row(row: &StringRecord) -> Option<Self> {
        if row.len() < super::DONATION_COLUMNS.len() {
            return None;
        }

        Some(Self {
            date: row[0].to_string(),
            order_id: row[1].to_string(),
            non_profit: row[2].to_string(),
            donation_currency: row[3].to_string(),
            donation_amount: row[4].to_string(),
            fee: row[5].to_string()
        })
    }
}
