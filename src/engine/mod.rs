mod errors;
mod report_pipeline;

pub use errors::ReportError;
pub use report_pipeline::{ReportPipeline, RequestContext};
