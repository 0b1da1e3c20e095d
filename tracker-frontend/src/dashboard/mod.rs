//! Dashboard: summary counters, the document table, replace and delete.

pub mod delete;
pub mod replace;
pub mod view;

use crate::models::{Document, DocumentId, FileUpload};
use crate::services::ApiError;
use async_trait::async_trait;

pub use delete::{delete_document, DeleteOutcome, DELETE_CONFIRMATION};
pub use replace::ReplaceModal;
pub use view::{DashboardView, DocumentRow, StatusSummary};

pub const EMPTY_MESSAGE: &str = "No documents uploaded yet";

/// Row actions the dashboard delegates to its owner, which is responsible
/// for refreshing the list after a success.
#[async_trait]
pub trait DashboardActions: Send + Sync {
    async fn replace(
        &self,
        id: &DocumentId,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError>;

    async fn delete(&self, id: &DocumentId) -> Result<(), ApiError>;
}
