use thiserror::Error;
use tokio::task::JoinError;

use crate::ingest::IngestError;
use crate::rates::RateError;
use crate::report::SerializeError;

const INTERNAL_STATUS: u16 = 500;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Unable to parse uploaded CSV: {0}")]
    ParseFailed(#[from] IngestError),
    #[error("Unable to look up exchange rates: {source}")]
    RateLookupFailed {
        status_code: Option<u16>,
        source: RateError
    },
    #[error("Invalid base currency")]
    InvalidBaseCurrency {
        status_code: u16
    },
    #[error("Unable to serialize report: {0}")]
    SerializationFailed(#[from] SerializeError),
    #[error("Report task did not complete: {0}")]
    Internal(#[from] JoinError)
}

impl ReportError {
    /// Machine readable name of the failure, used in error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ParseFailed(_) => "parse_failed",
            Self::RateLookupFailed { .. } => "rate_lookup_failed",
            Self::InvalidBaseCurrency { .. } => "invalid_base_currency",
            Self::SerializationFailed(_) => "serialization_failed",
            Self::Internal(_) => "internal"
        }
    }

    /// HTTP status the failure should surface as. Only an invalid base currency passes the
    /// upstream status through.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidBaseCurrency { status_code } => *status_code,
            _ => INTERNAL_STATUS
        }
    }
}

impl From<RateError> for ReportError {
    fn from(error: RateError) -> Self {
        match error {
            RateError::Upstream { status_code } => Self::InvalidBaseCurrency { status_code },
            RateError::Decode { status_code, .. } => Self::RateLookupFailed { status_code: Some(status_code), source: error },
            RateError::Network(_) => Self::RateLookupFailed { status_code: None, source: error }
        }
    }
}
