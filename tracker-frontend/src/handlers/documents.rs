use super::page::TrackerPage;
use crate::dashboard::{delete_document, DeleteOutcome, ReplaceModal};
use crate::forms::{read_document_form, UploadForm};
use crate::models::DocumentId;
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracker_core::error::AppError;

/// Page with the replace modal open for `id`.
pub async fn replace_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut modal = ReplaceModal::default();
    modal.open(DocumentId::new(id));

    TrackerPage::from_tracker(&state.tracker, &UploadForm::new(), &modal).await
}

pub async fn replace_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_document_form(multipart).await?;

    let mut modal = ReplaceModal::default();
    modal.open(DocumentId::new(id));

    match modal
        .submit(
            state.tracker.as_ref(),
            submission.file,
            &submission.expiry_date,
        )
        .await
    {
        Ok(document) => {
            tracing::info!(document_id = %document.id, "Replacement accepted");
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Replacement rejected");
            let page = TrackerPage::from_tracker(&state.tracker, &UploadForm::new(), &modal).await;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    /// Set by the page script once the user accepts the confirmation prompt.
    #[serde(default)]
    pub confirmed: bool,
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let id = DocumentId::new(id);

    match delete_document(state.tracker.as_ref(), &id, |_| form.confirmed).await {
        Ok(DeleteOutcome::Deleted) => Redirect::to("/").into_response(),
        Ok(DeleteOutcome::Cancelled) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::warn!(document_id = %id, error = %e, "Delete failed");
            let page = TrackerPage::from_tracker(
                &state.tracker,
                &UploadForm::new(),
                &ReplaceModal::default(),
            )
            .await
            .with_alert(e.message());
            (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
        }
    }
}
