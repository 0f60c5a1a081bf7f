use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Extension;

use crate::api::upload::{fields, ReportForm};
use crate::api::{ApiError, AppState, FieldError};
use crate::engine::RequestContext;

pub async fn health() -> &'static str {
    "OK"
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// `POST /report`: multipart `sample` CSV plus `baseCurrency`, answered with a CSV attachment.
pub async fn report(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let Ok(multipart) = multipart else {
        return Err(ApiError::Validation(vec![
            FieldError::body(fields::SAMPLE, None, "File is required"),
            FieldError::body(fields::BASE_CURRENCY, None, "Invalid value"),
        ]));
    };

    let request = ReportForm::receive(multipart, &state.upload_dir).await?
        .validate().await?;

    let report = state.pipeline
        .run(&request.sample.path, &request.base_currency, &context).await
        .map_err(|error| ApiError::report(error, state.debug_errors))?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", report.filename)),
    ];

    Ok((headers, report.body).into_response())
}
