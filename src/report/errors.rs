use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Unable to write report row: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unable to flush report: {0}")]
    Flush(String)
}
