mod aggregation;
mod api;
mod config;
mod engine;
mod ingest;
mod logging;
mod models;
mod rates;
mod report;
mod types;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::api::AppState;
use crate::config::Config;
use crate::engine::ReportPipeline;
use crate::ingest::CsvParser;
use crate::rates::HttpRateProvider;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    logging::init(config.log_level(), config.log_dir.as_deref())?;

    info!("Exchange rates from {} (timeout {:?})", config.rates_api_url, config.rates_timeout());

    let rates = HttpRateProvider::new(config.rates_api_url.clone(), config.rates_timeout())?;
    let parser = CsvParser::new().with_headers(config.csv_has_headers);
    let pipeline = ReportPipeline::new(parser, Arc::new(rates));
    let state = AppState::new(pipeline, config.upload_dir.clone(), config.debug_errors);

    api::serve(&config, state).await
}
