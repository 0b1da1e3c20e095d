pub mod expiry_date;
pub mod submission;
pub mod upload;

use crate::services::ApiError;
use thiserror::Error;

pub use expiry_date::ExpiryDateInput;
pub use submission::{read_document_form, DocumentSubmission};
pub use upload::{UploadForm, UploadPhase, Uploader};

/// Largest file either form accepts.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

pub const MSG_FILE_REQUIRED: &str = "Please select a file";
pub const MSG_FILE_TOO_LARGE: &str = "File size exceeds the limit of 5MB.";

#[derive(Debug, Error)]
pub enum FormError {
    /// Rejected locally; nothing was sent to the documents API.
    #[error("{0}")]
    Invalid(String),

    #[error("a submission is already in progress")]
    Busy,

    /// The documents API call failed; `message` is what the form displays.
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl FormError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}
