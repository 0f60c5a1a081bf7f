use crate::models::NonProfitAggregate;
use crate::report::{Report, SerializeError, REPORT_FILENAME};
use crate::types::to_fixed;
use csv::WriterBuilder;

pub const REPORT_HEADER: [&str; 4] = ["Non Profit", "Total amount", "Total Fee", "Number of Donations"];

pub struct ReportSerializer;

impl ReportSerializer {
    /// Renders aggregates as CSV, header first, totals with exactly two decimal places.
    ///
    /// The header row is always written, so an empty input yields a header-only report.
    pub fn serialize(aggregates: &[NonProfitAggregate]) -> Result<Vec<u8>, SerializeError> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(REPORT_HEADER)?;

        for aggregate in aggregates {
            let total_amount = to_fixed(aggregate.total_amount);
            let total_fee = to_fixed(aggregate.total_fee);
            let total_donations = aggregate.total_donations.to_string();

            writer.write_record([
                aggregate.non_profit.as_str(),
                total_amount.as_str(),
                total_fee.as_str(),
                total_donations.as_str()
            ])?;
        }

        writer.into_inner().map_err(|error| SerializeError::Flush(error.error().to_string()))
    }

    pub fn render(aggregates: &[NonProfitAggregate]) -> Result<Report, SerializeError> {
        Ok(Report {
            filename: REPORT_FILENAME,
            body: Self::serialize(aggregates)?
        })
    }
}
