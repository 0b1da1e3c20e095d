use super::page::TrackerPage;
use crate::dashboard::ReplaceModal;
use crate::forms::UploadForm;
use crate::AppState;
use axum::{extract::State, response::IntoResponse};

/// Initial page load: fetch the list, then render. A failed fetch shows the
/// page-level banner over the last known list.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    // Failure is already recorded in the store for the banner.
    let _ = state.tracker.refresh().await;

    TrackerPage::from_tracker(&state.tracker, &UploadForm::new(), &ReplaceModal::default()).await
}

pub async fn health_check() -> &'static str {
    "OK"
}
