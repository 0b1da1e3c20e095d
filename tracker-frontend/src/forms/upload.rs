//! The new-document upload form.

use super::expiry_date::ExpiryDateInput;
use super::{FormError, MAX_FILE_SIZE, MSG_FILE_REQUIRED, MSG_FILE_TOO_LARGE};
use crate::models::{Document, FileUpload};
use crate::services::ApiError;
use async_trait::async_trait;

pub const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["application/pdf", "image/jpeg", "image/png", "image/jpg"];

pub const MSG_INVALID_TYPE: &str = "Invalid file type. Please select a PDF, JPEG, or PNG file.";
pub const MSG_UPLOAD_FAILED: &str = "Failed to upload document. Please try again.";
pub const MSG_UPLOAD_SUCCEEDED: &str = "Document uploaded successfully!";

/// Callback the form hands a validated upload to. The implementor owns the
/// create call and the list refresh that follows it.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Type and size checks shared by file selection and submit.
pub fn validate_file(file: &FileUpload) -> Result<(), String> {
    let content_type = file.content_type.to_ascii_lowercase();
    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(MSG_INVALID_TYPE.to_string());
    }
    if file.size() > MAX_FILE_SIZE {
        return Err(MSG_FILE_TOO_LARGE.to_string());
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<FileUpload>,
    expiry: ExpiryDateInput,
    phase: UploadPhase,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn file(&self) -> Option<&FileUpload> {
        self.file.as_ref()
    }

    pub fn expiry_input(&self) -> &str {
        self.expiry.value()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            UploadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.phase == UploadPhase::Succeeded
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == UploadPhase::Submitting
    }

    /// The success banner lasts until the next interaction.
    fn touch(&mut self) {
        if self.phase == UploadPhase::Succeeded {
            self.phase = UploadPhase::Idle;
        }
    }

    /// Pick a file. A file failing the type or size check is not kept.
    pub fn select_file(&mut self, file: FileUpload) -> Result<(), FormError> {
        self.touch();
        match validate_file(&file) {
            Ok(()) => {
                self.file = Some(file);
                self.phase = UploadPhase::Idle;
                Ok(())
            }
            Err(message) => {
                tracing::debug!(file = ?file, reason = %message, "File selection rejected");
                self.phase = UploadPhase::Failed(message.clone());
                Err(FormError::Invalid(message))
            }
        }
    }

    /// Replace the date field's content, as a change event would.
    pub fn set_expiry(&mut self, raw: &str) {
        self.touch();
        self.expiry.input(raw);
    }

    pub fn set_expiry_input(&mut self, input: ExpiryDateInput) {
        self.touch();
        self.expiry = input;
    }

    /// Validate and hand the upload to `uploader`.
    ///
    /// The uploader is only called once every local check has passed. On
    /// success both fields are cleared; on failure the file stays selected.
    pub async fn submit<U>(&mut self, uploader: &U) -> Result<Document, FormError>
    where
        U: Uploader + ?Sized,
    {
        if self.is_submitting() {
            return Err(FormError::Busy);
        }

        self.phase = UploadPhase::Validating;
        let Some(file) = self.file.clone() else {
            return Err(self.fail_locally(MSG_FILE_REQUIRED.to_string()));
        };
        if let Err(message) = validate_file(&file) {
            return Err(self.fail_locally(message));
        }
        let expiry_date = self.expiry.to_api_date();

        self.phase = UploadPhase::Submitting;
        tracing::debug!(file = ?file, expiry_date = ?expiry_date, "Submitting upload");

        match uploader.upload(file, expiry_date).await {
            Ok(document) => {
                self.file = None;
                self.expiry.clear();
                self.phase = UploadPhase::Succeeded;
                Ok(document)
            }
            Err(source) => {
                let message = source.user_message(MSG_UPLOAD_FAILED);
                self.phase = UploadPhase::Failed(message.clone());
                Err(FormError::Rejected { message, source })
            }
        }
    }

    fn fail_locally(&mut self, message: String) -> FormError {
        self.phase = UploadPhase::Failed(message.clone());
        FormError::Invalid(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::DocumentApi;
    use crate::test_support::RecordingApi;
    use reqwest::StatusCode;

    #[async_trait]
    impl Uploader for RecordingApi {
        async fn upload(
            &self,
            file: FileUpload,
            expiry_date: Option<String>,
        ) -> Result<Document, ApiError> {
            self.create(file, expiry_date).await
        }
    }

    fn pdf(size: usize) -> FileUpload {
        FileUpload::new("passport.pdf", "application/pdf", vec![0u8; size])
    }

    #[tokio::test]
    async fn uploads_valid_file_with_converted_date() {
        let api = RecordingApi::default();
        let mut form = UploadForm::new();
        form.select_file(pdf(1024)).unwrap();
        for c in "31122024".chars() {
            let mut raw = form.expiry_input().to_string();
            raw.push(c);
            form.set_expiry(&raw);
        }

        let document = form.submit(&api).await.unwrap();

        assert_eq!(document.original_filename, "passport.pdf");
        assert_eq!(
            api.creates(),
            vec![("passport.pdf".to_string(), Some("2024-12-31".to_string()))]
        );
        assert!(form.succeeded());
        assert!(form.file().is_none());
        assert_eq!(form.expiry_input(), "");
    }

    #[tokio::test]
    async fn missing_file_never_calls_create() {
        let api = RecordingApi::default();
        let mut form = UploadForm::new();

        let err = form.submit(&api).await.unwrap_err();

        assert!(matches!(err, FormError::Invalid(ref m) if m == MSG_FILE_REQUIRED));
        assert!(api.creates().is_empty());
    }

    #[tokio::test]
    async fn unsupported_type_never_calls_create() {
        let api = RecordingApi::default();
        let mut form = UploadForm::new();

        for content_type in ["text/plain", "application/msword", "image/gif", ""] {
            let err = form
                .select_file(FileUpload::new("notes", content_type, vec![1, 2, 3]))
                .unwrap_err();
            assert_eq!(err.message(), MSG_INVALID_TYPE);
        }
        assert!(form.submit(&api).await.is_err());
        assert!(api.creates().is_empty());
    }

    #[tokio::test]
    async fn oversize_file_never_calls_create() {
        let api = RecordingApi::default();
        let mut form = UploadForm::new();

        let err = form.select_file(pdf(MAX_FILE_SIZE + 1)).unwrap_err();

        assert_eq!(err.message(), MSG_FILE_TOO_LARGE);
        assert!(form.file().is_none());
        assert!(form.submit(&api).await.is_err());
        assert!(api.creates().is_empty());
    }

    #[test]
    fn exactly_five_mib_is_accepted() {
        assert!(validate_file(&pdf(MAX_FILE_SIZE)).is_ok());
        assert!(validate_file(&FileUpload::new("a.jpg", "image/jpg", vec![1])).is_ok());
        assert!(validate_file(&FileUpload::new("a.PNG", "IMAGE/PNG", vec![1])).is_ok());
    }

    #[tokio::test]
    async fn server_detail_is_shown_verbatim_and_file_is_kept() {
        let api = RecordingApi::default();
        api.fail_next_create(ApiError::Validation {
            status: StatusCode::BAD_REQUEST,
            detail: Some("Invalid file type".to_string()),
        });
        let mut form = UploadForm::new();
        form.select_file(pdf(10)).unwrap();

        let err = form.submit(&api).await.unwrap_err();

        assert_eq!(err.message(), "Invalid file type");
        assert_eq!(form.error(), Some("Invalid file type"));
        assert!(form.file().is_some());
    }

    #[tokio::test]
    async fn generic_message_without_detail() {
        let api = RecordingApi::default();
        api.fail_next_create(ApiError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        });
        let mut form = UploadForm::new();
        form.select_file(pdf(10)).unwrap();

        let err = form.submit(&api).await.unwrap_err();

        assert_eq!(err.message(), MSG_UPLOAD_FAILED);
    }

    #[tokio::test]
    async fn success_banner_clears_on_next_interaction() {
        let api = RecordingApi::default();
        let mut form = UploadForm::new();
        form.select_file(pdf(10)).unwrap();
        form.submit(&api).await.unwrap();
        assert!(form.succeeded());

        form.set_expiry("0");

        assert_eq!(form.phase(), &UploadPhase::Idle);
    }

    #[test]
    fn valid_selection_clears_previous_error() {
        let mut form = UploadForm::new();
        let _ = form.select_file(FileUpload::new("x.txt", "text/plain", vec![1]));
        assert!(form.error().is_some());

        form.select_file(pdf(1)).unwrap();

        assert!(form.error().is_none());
    }
}
