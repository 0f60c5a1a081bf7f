mod csv_parser;
mod errors;

pub use csv_parser::CsvParser;
pub use errors::IngestError;
