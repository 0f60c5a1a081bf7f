mod errors;
mod http_provider;

use async_trait::async_trait;

use crate::types::RateTable;

pub use errors::RateError;
pub use http_provider::{HttpRateProvider, DEFAULT_BASE_URL};

/// Source of exchange rates for a base currency.
#[async_trait]
pub trait RateProvider: Send + Sync + 'static {
    async fn fetch(&self, base_currency: &str) -> Result<RateTable, RateError>;
}
