use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::{ApiError, FieldError};

pub mod fields {
    pub const SAMPLE: &str = "sample";
    pub const BASE_CURRENCY: &str = "baseCurrency";
}

/// A file written to the upload dir. Whoever holds it is responsible for deleting it.
#[derive(Debug)]
pub struct StoredUpload {
    pub path: PathBuf
}

impl StoredUpload {
    pub async fn discard(self) {
        if let Err(error) = tokio::fs::remove_file(&self.path).await {
            warn!("Unable to delete upload [{}]: {error}", self.path.display());
        }
    }
}

/// The `POST /report` form before validation.
#[derive(Debug, Default)]
pub struct ReportForm {
    pub base_currency: Option<String>,
    pub sample: Option<StoredUpload>
}

/// A validated form: the stored sample and a trimmed base currency code.
#[derive(Debug)]
pub struct ReportRequest {
    pub sample: StoredUpload,
    pub base_currency: String
}

impl ReportForm {
    /// Reads every multipart field, streaming `sample` into `upload_dir`.
    ///
    /// A file already stored is deleted again if the body turns out to be unreadable.
    pub async fn receive(mut multipart: Multipart, upload_dir: &Path) -> Result<Self, ApiError> {
        let mut form = ReportForm::default();

        if let Err(error) = form.read_fields(&mut multipart, upload_dir).await {
            form.discard().await;
            return Err(error);
        }

        Ok(form)
    }

    async fn read_fields(&mut self, multipart: &mut Multipart, upload_dir: &Path) -> Result<(), ApiError> {
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);

            match name.as_deref() {
                Some(fields::SAMPLE) if self.sample.is_none() => {
                    self.sample = Some(store(field, upload_dir).await?);
                }
                Some(fields::BASE_CURRENCY) => {
                    self.base_currency = Some(field.text().await?);
                }
                _ => debug!("Ignoring multipart field {name:?}")
            }
        }

        Ok(())
    }

    /// Checks the form; a rejected form deletes its stored sample.
    pub async fn validate(self) -> Result<ReportRequest, ApiError> {
        let mut errors = Vec::new();
        let base_currency = self.base_currency.as_deref().map(str::trim).unwrap_or_default().to_string();

        if !is_currency_code(&base_currency) {
            errors.push(FieldError::body(fields::BASE_CURRENCY, self.base_currency.clone(), "Invalid value"));
        }

        match self.sample {
            Some(sample) if errors.is_empty() => Ok(ReportRequest { sample, base_currency }),
            Some(sample) => {
                sample.discard().await;
                Err(ApiError::Validation(errors))
            }
            None => {
                errors.push(FieldError::body(fields::SAMPLE, None, "File is required"));
                Err(ApiError::Validation(errors))
            }
        }
    }

    pub async fn discard(self) {
        if let Some(sample) = self.sample {
            sample.discard().await;
        }
    }
}

fn is_currency_code(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

async fn store(mut field: Field<'_>, upload_dir: &Path) -> Result<StoredUpload, ApiError> {
    let extension = field.file_name()
        .and_then(|name| Path::new(name).extension())
        .and_then(|extension| extension.to_str())
        .filter(|extension| extension.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|extension| format!(".{extension}"))
        .unwrap_or_default();

    let path = upload_dir.join(format!("{}_{}{}", Uuid::new_v4(), fields::SAMPLE, extension));
    let upload = StoredUpload { path };
    let mut file = File::create(&upload.path).await?;

    let written = async {
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
        }

        file.flush().await?;

        Ok::<(), ApiError>(())
    }
    .await;

    match written {
        Ok(_) => {
            debug!("Stored upload at {}", upload.path.display());
            Ok(upload)
        }
        Err(error) => {
            drop(file);
            upload.discard().await;
            Err(error)
        }
    }
}
