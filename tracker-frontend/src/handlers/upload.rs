use super::page::TrackerPage;
use crate::dashboard::ReplaceModal;
use crate::forms::{read_document_form, ExpiryDateInput, UploadForm};
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracker_core::error::AppError;

/// Run a posted upload through the form and re-render the page with its
/// success banner or inline error.
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_document_form(multipart).await?;

    let mut form = UploadForm::new();
    form.set_expiry_input(ExpiryDateInput::from_submitted(&submission.expiry_date));

    let selected = match submission.file {
        Some(file) => form.select_file(file).is_ok(),
        None => true,
    };
    let status = if selected {
        match form.submit(state.tracker.as_ref()).await {
            Ok(document) => {
                tracing::info!(document_id = %document.id, "Upload accepted");
                StatusCode::OK
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upload rejected");
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    let page = TrackerPage::from_tracker(&state.tracker, &form, &ReplaceModal::default()).await;
    Ok((status, page).into_response())
}
