use super::DashboardActions;
use crate::forms::{FormError, MAX_FILE_SIZE, MSG_FILE_REQUIRED, MSG_FILE_TOO_LARGE};
use crate::models::{Document, DocumentId, FileUpload};

pub const MSG_REPLACE_FAILED: &str = "Failed to replace document. Please try again.";

/// The replace dialog, bound to one document while open.
#[derive(Debug, Clone, Default)]
pub struct ReplaceModal {
    document_id: Option<DocumentId>,
    error: Option<String>,
    loading: bool,
}

impl ReplaceModal {
    pub fn open(&mut self, id: DocumentId) {
        *self = Self {
            document_id: Some(id),
            error: None,
            loading: false,
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.document_id.is_some()
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.document_id.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit a replacement for the bound document.
    ///
    /// The expiry date is free text and forwarded as entered. Success closes
    /// the modal; failure keeps it open with a message and hands the error
    /// back so the caller can keep showing it.
    pub async fn submit<A>(
        &mut self,
        actions: &A,
        file: Option<FileUpload>,
        expiry_date: &str,
    ) -> Result<Document, FormError>
    where
        A: DashboardActions + ?Sized,
    {
        let Some(id) = self.document_id.clone() else {
            return Err(FormError::Invalid("No document selected".to_string()));
        };
        if self.loading {
            return Err(FormError::Busy);
        }
        self.error = None;

        let file = match file {
            Some(file) if !file.file_name.is_empty() => file,
            _ => return Err(self.fail(FormError::Invalid(MSG_FILE_REQUIRED.to_string()))),
        };
        if file.size() > MAX_FILE_SIZE {
            return Err(self.fail(FormError::Invalid(MSG_FILE_TOO_LARGE.to_string())));
        }
        let expiry_date = Some(expiry_date.trim())
            .filter(|date| !date.is_empty())
            .map(str::to_owned);

        self.loading = true;
        match actions.replace(&id, file, expiry_date).await {
            Ok(document) => {
                self.close();
                Ok(document)
            }
            Err(source) => {
                self.loading = false;
                let message = source.user_message(MSG_REPLACE_FAILED);
                Err(self.fail(FormError::Rejected { message, source }))
            }
        }
    }

    fn fail(&mut self, err: FormError) -> FormError {
        self.error = Some(err.message());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ApiError;
    use crate::state::Tracker;
    use crate::test_support::{sample_document, Call, RecordingApi};
    use reqwest::StatusCode;
    use std::sync::Arc;

    fn setup() -> (Arc<RecordingApi>, Tracker) {
        let api = Arc::new(RecordingApi::with_documents(vec![sample_document(
            "3", "old.pdf", None,
        )]));
        let tracker = Tracker::new(api.clone());
        (api, tracker)
    }

    fn png() -> FileUpload {
        FileUpload::new("new.png", "image/png", vec![9; 16])
    }

    #[tokio::test]
    async fn success_closes_modal_and_refreshes() {
        let (api, tracker) = setup();
        let mut modal = ReplaceModal::default();
        modal.open(DocumentId::from("3"));

        let document = modal.submit(&tracker, Some(png()), "2031-01-31").await.unwrap();

        assert_eq!(document.original_filename, "new.png");
        assert!(!modal.is_open());
        assert_eq!(
            api.calls(),
            vec![
                Call::Replace {
                    id: "3".to_string(),
                    file_name: "new.png".to_string(),
                    expiry_date: Some("2031-01-31".to_string())
                },
                Call::List
            ]
        );
    }

    #[tokio::test]
    async fn missing_file_keeps_modal_open_without_calling_replace() {
        let (api, tracker) = setup();
        let mut modal = ReplaceModal::default();
        modal.open(DocumentId::from("3"));

        let err = modal.submit(&tracker, None, "").await.unwrap_err();

        assert_eq!(err.message(), MSG_FILE_REQUIRED);
        assert!(modal.is_open());
        assert_eq!(modal.error(), Some(MSG_FILE_REQUIRED));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn server_failure_keeps_modal_open_for_retry() {
        let (api, tracker) = setup();
        api.fail_next_replace(ApiError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        });
        let mut modal = ReplaceModal::default();
        modal.open(DocumentId::from("3"));

        let err = modal.submit(&tracker, Some(png()), "").await.unwrap_err();
        assert_eq!(err.message(), MSG_REPLACE_FAILED);
        assert!(modal.is_open());
        assert!(!modal.loading);
        assert_eq!(api.list_calls(), 0);

        modal.submit(&tracker, Some(png()), "").await.unwrap();
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn stale_id_shows_server_detail() {
        let (_api, tracker) = setup();
        let mut modal = ReplaceModal::default();
        modal.open(DocumentId::from("404"));

        let err = modal.submit(&tracker, Some(png()), "").await.unwrap_err();

        assert_eq!(err.message(), "Document not found");
        assert_eq!(modal.error(), Some("Document not found"));
    }

    #[tokio::test]
    async fn closed_modal_refuses_submit() {
        let (api, tracker) = setup();
        let mut modal = ReplaceModal::default();

        assert!(modal.submit(&tracker, Some(png()), "").await.is_err());
        assert!(api.calls().is_empty());
    }
}
