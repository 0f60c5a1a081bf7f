mod errors;
mod serializer;

pub use errors::SerializeError;
pub use serializer::ReportSerializer;

pub const REPORT_FILENAME: &str = "report.csv";

/// A rendered report ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct Report {
    pub filename: &'static str,
    pub body: Vec<u8>
}
