use crate::models::FileUpload;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use tracker_core::error::AppError;

/// Fields posted by the upload and replace forms.
#[derive(Debug, Default)]
pub struct DocumentSubmission {
    /// `None` when the browser sent an empty file part (nothing picked).
    pub file: Option<FileUpload>,
    pub expiry_date: String,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(anyhow::anyhow!(err.body_text()))
    }
}

pub async fn read_document_form(mut multipart: Multipart) -> Result<DocumentSubmission, AppError> {
    let mut submission = DocumentSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;

                if !file_name.is_empty() || !bytes.is_empty() {
                    submission.file = Some(FileUpload::new(file_name, content_type, bytes.to_vec()));
                }
            }
            Some("expiry_date") => {
                submission.expiry_date = field.text().await.map_err(multipart_error)?;
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unexpected form field");
            }
        }
    }

    Ok(submission)
}
