use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::engine::ReportError;

/// A single rejected form field, shaped like `{ location, param, msg }`.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub location: &'static str,
    pub param: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub msg: &'static str
}

impl FieldError {
    pub fn body(param: &'static str, value: Option<String>, msg: &'static str) -> Self {
        Self { location: "body", param, value, msg }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request validation failed")]
    Validation(Vec<FieldError>),
    #[error("Unable to read multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Unable to store upload: {0}")]
    Storage(#[from] std::io::Error),
    #[error("{error}")]
    Report {
        error: ReportError,
        expose: bool
    },
    #[error("Not Found")]
    NotFound
}

impl ApiError {
    pub fn report(error: ReportError, expose: bool) -> Self {
        Self::Report { error, expose }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                debug!("Rejected request: {errors:?}");
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors }))).into_response()
            }
            Self::Multipart(error) => {
                let status = error.status();
                debug!("Rejected multipart body: {error}");
                error_body(status, "multipart_failed", error.body_text())
            }
            Self::Storage(error) => {
                error!("Unable to store upload: {error}");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "upload_failed", "Unable to store upload".to_string())
            }
            Self::Report { error, expose } => {
                let status = StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let mut body = json!({
                    "error": error.kind(),
                    "message": error.to_string(),
                    "status": status.as_u16()
                });

                if expose {
                    body["detail"] = json!(format!("{error:?}"));
                    body["stack"] = json!(source_chain(&error));
                }

                (status, Json(body)).into_response()
            }
            Self::NotFound => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response()
        }
    }
}

fn error_body(status: StatusCode, kind: &str, message: String) -> Response {
    (status, Json(json!({ "error": kind, "message": message, "status": status.as_u16() }))).into_response()
}

fn source_chain(error: &dyn std::error::Error) -> Vec<String> {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();

    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }

    chain
}
