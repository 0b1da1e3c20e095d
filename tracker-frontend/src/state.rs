//! Top-level document state and the mutation/refresh sequencing around it.

use crate::dashboard::DashboardActions;
use crate::forms::Uploader;
use crate::models::{Document, DocumentId, FileUpload};
use crate::services::{ApiError, DocumentApi};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const MSG_FETCH_FAILED: &str = "Failed to fetch documents";

/// Everything the page renders from. Only ever changed through
/// [`StoreAction`]s.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    pub documents: Vec<Document>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum StoreAction {
    SetDocuments(Vec<Document>),
    SetLoading(bool),
    SetError(Option<String>),
}

impl DocumentStore {
    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::SetDocuments(documents) => self.documents = documents,
            StoreAction::SetLoading(loading) => self.loading = loading,
            StoreAction::SetError(error) => self.error = error,
        }
    }
}

/// Owns the documents API handle and the store.
///
/// Every successful mutation is followed by exactly one full list refresh;
/// the list is never patched locally. Concurrent callers are not reconciled:
/// the last refresh to finish wins.
pub struct Tracker {
    api: Arc<dyn DocumentApi>,
    store: RwLock<DocumentStore>,
}

impl Tracker {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self {
            api,
            store: RwLock::new(DocumentStore::default()),
        }
    }

    pub async fn snapshot(&self) -> DocumentStore {
        self.store.read().await.clone()
    }

    pub async fn dispatch(&self, action: StoreAction) {
        self.store.write().await.apply(action);
    }

    /// Replace the whole list with the server's. On failure the previous
    /// list is kept and the page-level error is set.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.dispatch(StoreAction::SetLoading(true)).await;

        let result = self.api.list().await;
        let outcome = match result {
            Ok(documents) => {
                tracing::debug!(count = documents.len(), "Document list refreshed");
                self.dispatch(StoreAction::SetDocuments(documents)).await;
                self.dispatch(StoreAction::SetError(None)).await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching documents");
                self.dispatch(StoreAction::SetError(Some(MSG_FETCH_FAILED.to_string())))
                    .await;
                Err(e)
            }
        };

        self.dispatch(StoreAction::SetLoading(false)).await;
        outcome
    }

    async fn mutate<T, F>(&self, operation: &'static str, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.dispatch(StoreAction::SetLoading(true)).await;

        let result = call.await;
        match &result {
            Ok(_) => {
                if let Err(e) = self.refresh().await {
                    tracing::warn!(operation, error = %e, "Refresh after mutation failed");
                }
            }
            Err(e) => tracing::error!(operation, error = %e, "Document mutation failed"),
        }

        self.dispatch(StoreAction::SetLoading(false)).await;
        result
    }

    pub async fn create_document(
        &self,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError> {
        self.mutate("create", self.api.create(file, expiry_date))
            .await
    }

    pub async fn replace_document(
        &self,
        id: &DocumentId,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError> {
        self.mutate("replace", self.api.replace(id, file, expiry_date))
            .await
    }

    pub async fn delete_document(&self, id: &DocumentId) -> Result<(), ApiError> {
        self.mutate("delete", self.api.delete(id)).await
    }
}

#[async_trait]
impl Uploader for Tracker {
    async fn upload(
        &self,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError> {
        self.create_document(file, expiry_date).await
    }
}

#[async_trait]
impl DashboardActions for Tracker {
    async fn replace(
        &self,
        id: &DocumentId,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError> {
        self.replace_document(id, file, expiry_date).await
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), ApiError> {
        self.delete_document(id).await
    }
}
