use crate::aggregation::Aggregator;
use crate::engine::ReportError;
use crate::ingest::CsvParser;
use crate::models::DonationRecord;
use crate::rates::RateProvider;
use crate::report::{Report, ReportSerializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Request scoped logging context handed to the pipeline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self { request_id: request_id.into() }
    }
}

/// Linear progression of a single report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    Parsed,
    RatesFetched,
    Aggregated,
    Serialized,
    Done
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, formatter)
    }
}

/// Turns an uploaded donations CSV into a per non-profit report in a base currency.
pub struct ReportPipeline {
    parser: CsvParser,
    rates: Arc<dyn RateProvider>
}

impl ReportPipeline {
    pub fn new(parser: CsvParser, rates: Arc<dyn RateProvider>) -> Self {
        Self { parser, rates }
    }

    /// Runs parse, rate lookup, aggregation and serialization for one upload.
    ///
    /// The upload is owned by this run and is deleted once it finishes, whatever the outcome.
    /// A failed deletion is logged and never changes the result.
    pub async fn run(&self, upload: &Path, base_currency: &str, context: &RequestContext) -> Result<Report, ReportError> {
        let span = info_span!("report", request_id = %context.request_id, base_currency);

        async {
            let result = self.generate(upload, base_currency).await;
            discard_upload(upload).await;
            result
        }
        .instrument(span)
        .await
    }

    async fn generate(&self, upload: &Path, base_currency: &str) -> Result<Report, ReportError> {
        let mut stage = PipelineStage::Start;
        let result = self.run_stages(upload, base_currency, &mut stage).await;

        match &result {
            Ok(_) => advance(&mut stage, PipelineStage::Done),
            Err(error) => error!("Report failed after stage [{stage}] with [{}]: {error}", error.kind())
        }

        result
    }

    async fn run_stages(&self, upload: &Path, base_currency: &str, stage: &mut PipelineStage) -> Result<Report, ReportError> {
        let records = self.parse(upload).await?;
        advance(stage, PipelineStage::Parsed);

        let rates = self.rates.fetch(base_currency).await?;
        advance(stage, PipelineStage::RatesFetched);

        let aggregates = Aggregator::aggregate(&rates, &records);
        advance(stage, PipelineStage::Aggregated);

        let report = ReportSerializer::render(&aggregates)?;
        advance(stage, PipelineStage::Serialized);

        info!("Report ready: {} records, {} non-profits", records.len(), aggregates.len());

        Ok(report)
    }

    async fn parse(&self, upload: &Path) -> Result<Vec<DonationRecord>, ReportError> {
        let parser = self.parser;
        let path: PathBuf = upload.to_path_buf();

        Ok(spawn_blocking(move || parser.parse(&path)).await??)
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    debug!("Report stage {stage} -> {next}");
    *stage = next;
}

async fn discard_upload(upload: &Path) {
    match tokio::fs::remove_file(upload).await {
        Ok(_) => debug!("Input file deleted"),
        Err(error) => warn!("Unable to delete upload [{}]: {error}", upload.display())
    }
}
