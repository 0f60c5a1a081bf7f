use crate::ingest::IngestError;
use crate::models::{DonationRecord, DONATION_COLUMNS};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Reads uploaded donation exports into records.
///
/// Rows are read in the fixed column order `date, orderId, nonProfit, donationCurrency,
/// donationAmount, fee`. Rows with too few fields are skipped with a warning; only reader level
/// failures (I/O, invalid UTF-8) fail the whole parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser {
    has_headers: bool
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats the first row as a header and skips it.
    //NOTE: Off by default. A header row read as data never reaches a report, its currency column
    //      ("Donation Currency") is not a rate key so the aggregator drops it.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Parses the file at `path`. Blocking; run it off the async executor.
    pub fn parse(&self, path: &Path) -> Result<Vec<DonationRecord>, IngestError> {
        let file = File::open(path).map_err(|source| IngestError::Io { path: path.to_path_buf(), source })?;

        self.parse_reader(BufReader::new(file))
            .map_err(|source| {
                if source.is_io_error() {
                    IngestError::Io { path: path.to_path_buf(), source: source.into() }
                } else {
                    IngestError::Malformed { path: path.to_path_buf(), source }
                }
            })
    }

    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<DonationRecord>, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.has_headers)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut row = StringRecord::new();

        while reader.read_record(&mut row)? {
            match DonationRecord::from_row(&row) {
                Some(record) => records.push(record),
                None => {
                    let line = row.position().map(|position| position.line()).unwrap_or_default();
                    warn!("Skipping CSV row at line [{line}]: expected {} fields, found {}", DONATION_COLUMNS.len(), row.len());
                }
            }
        }

        debug!("Parsed {} donation records", records.len());

        Ok(records)
    }
}
