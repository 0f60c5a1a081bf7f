use crate::rates::{RateError, RateProvider};
use crate::types::RateTable;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com";

/// Client for `{base_url}/v4/latest/{base}` style exchange rate APIs.
pub struct HttpRateProvider {
    client: reqwest::Client,
    base_url: String
}

impl HttpRateProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string()
        })
    }

    fn latest_url(&self, base_currency: &str) -> String {
        format!("{}/v4/latest/{}", self.base_url, base_currency)
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn fetch(&self, base_currency: &str) -> Result<RateTable, RateError> {
        let url = self.latest_url(base_currency);
        debug!("Fetching exchange rates from {url}");

        let response = self.client.get(&url).send().await?;
        let status_code = response.status().as_u16();

        if !(200..400).contains(&status_code) {
            return Err(RateError::Upstream { status_code });
        }

        let body = response.bytes().await?;
        let latest: api::Latest = serde_json::from_slice(&body)
            .map_err(|source| RateError::Decode { status_code, source })?;

        if latest.rates.is_empty() {
            warn!("Exchange rate API returned no rates for base [{base_currency}]");
        } else {
            debug!("Received {} exchange rates for base [{base_currency}]", latest.rates.len());
        }

        Ok(latest.rates)
    }
}

mod api {
    use serde::Deserialize;

    use crate::types::RateTable;

    #[derive(Deserialize, Debug)]
    pub struct Latest {
        pub rates: RateTable
    }
}
