//! The single tracker page and the view models it renders from.

use crate::dashboard::{DashboardView, ReplaceModal, DELETE_CONFIRMATION};
use crate::forms::upload::MSG_UPLOAD_SUCCEEDED;
use crate::forms::UploadForm;
use crate::state::Tracker;
use askama::Template;
use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, Default)]
pub struct UploadFormView {
    pub expiry_value: String,
    pub error: Option<String>,
    pub success: Option<&'static str>,
    pub selected_file: Option<String>,
}

impl From<&UploadForm> for UploadFormView {
    fn from(form: &UploadForm) -> Self {
        Self {
            expiry_value: form.expiry_input().to_string(),
            error: form.error().map(str::to_owned),
            success: form.succeeded().then_some(MSG_UPLOAD_SUCCEEDED),
            selected_file: form.file().map(|file| file.file_name.clone()),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/tracker.html")]
pub struct TrackerPage {
    pub page_error: Option<String>,
    pub alert: Option<String>,
    pub upload: UploadFormView,
    pub dashboard: DashboardView,
    pub delete_confirmation: &'static str,
}

impl TrackerPage {
    /// Render from the tracker's current store, without fetching.
    pub async fn from_tracker(
        tracker: &Tracker,
        upload: &UploadForm,
        modal: &ReplaceModal,
    ) -> Self {
        let store = tracker.snapshot().await;

        Self {
            page_error: store.error.clone(),
            alert: None,
            upload: UploadFormView::from(upload),
            dashboard: DashboardView::build(&store, modal, today()),
            delete_confirmation: DELETE_CONFIRMATION,
        }
    }

    pub fn with_alert(mut self, message: String) -> Self {
        self.alert = Some(message);
        self
    }
}
