use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Exchange rate API responded with status [{status_code}]")]
    Upstream {
        status_code: u16
    },
    #[error("Exchange rate API is unreachable: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Exchange rate API returned an unreadable body (status [{status_code}]): {source}")]
    Decode {
        status_code: u16,
        source: serde_json::Error
    }
}
