//! HTTP client for the remote documents API.
//!
//! Four operations (list, create, replace, delete) over a fixed base address.
//! Uploads are sent as `multipart/form-data` with a `file` part and an
//! optional `expiry_date` text part already normalised to `YYYY-MM-DD`.

use crate::config::ApiSettings;
use crate::models::{Document, DocumentId, FileUpload};
use async_trait::async_trait;
use metrics::counter;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracker_core::observability::TracedClientExt;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server refused the payload (400/422), e.g. an unsupported file type.
    #[error("rejected by documents API ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Validation {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("document not found: {}", .detail.as_deref().unwrap_or("no detail"))]
    NotFound { detail: Option<String> },

    #[error("documents API returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Http {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response from documents API: {0}")]
    InvalidResponse(String),

    /// The request could not be built, e.g. an unparseable content type.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Human-readable message supplied by the server, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Validation { detail, .. }
            | ApiError::NotFound { detail }
            | ApiError::Http { detail, .. } => detail.as_deref(),
            ApiError::Network(_) | ApiError::InvalidResponse(_) | ApiError::InvalidRequest(_) => {
                None
            }
        }
    }

    /// The server detail when present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = detail_from_body(body);
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound { detail },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation { status, detail }
            }
            _ => ApiError::Http { status, detail },
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "rejected",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Http { .. } => "http_error",
            ApiError::Network(_) => "network_error",
            ApiError::InvalidResponse(_) => "invalid_response",
            ApiError::InvalidRequest(_) => "invalid_request",
        }
    }
}

/// Extract a string `detail` from an error body. Validation lists and
/// non-JSON bodies carry no usable message.
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .map(str::to_owned)
}

/// The document operations the rest of the application depends on.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Document>, ApiError>;

    async fn create(
        &self,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError>;

    async fn replace(
        &self,
        id: &DocumentId,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError>;

    async fn delete(&self, id: &DocumentId) -> Result<(), ApiError>;
}

pub struct DocumentClient {
    client: Client,
    settings: ApiSettings,
}

impl DocumentClient {
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        self.settings.base_url.trim_end_matches('/')
    }

    fn collection_url(&self) -> String {
        format!("{}/documents/", self.base_url())
    }

    fn document_url(&self, id: &DocumentId) -> String {
        format!(
            "{}/documents/{}",
            self.base_url(),
            urlencoding::encode(id.as_str())
        )
    }

    fn upload_form(file: FileUpload, expiry_date: Option<String>) -> Result<Form, ApiError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| {
                ApiError::InvalidRequest(format!(
                    "content type {:?}: {}",
                    file.content_type, e
                ))
            })?;

        let form = Form::new().part("file", part);
        Ok(match expiry_date {
            Some(date) => form.text("expiry_date", date),
            None => form,
        })
    }
}

/// Read the body and either decode it or turn the status into an `ApiError`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    } else {
        Err(ApiError::from_response(status, &body))
    }
}

fn record(operation: &'static str, result: &Result<impl Sized, ApiError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.outcome(),
    };
    counter!("upstream_requests_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

#[async_trait]
impl DocumentApi for DocumentClient {
    async fn list(&self) -> Result<Vec<Document>, ApiError> {
        let url = self.collection_url();

        let result: Result<Vec<Document>, ApiError> = async {
            let response = self.client.traced_get(&url).send().await?;
            decode::<Vec<Document>>(response).await
        }
        .await;
        record("list", &result);

        match &result {
            Ok(documents) => tracing::debug!(count = documents.len(), "Fetched documents"),
            Err(e) => tracing::error!(url = %url, error = %e, "List documents failed"),
        }
        result
    }

    async fn create(
        &self,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError> {
        let url = self.collection_url();
        let file_name = file.file_name.clone();

        let result: Result<Document, ApiError> = async {
            let form = Self::upload_form(file, expiry_date)?;
            let response = self.client.traced_post(&url).multipart(form).send().await?;
            decode::<Document>(response).await
        }
        .await;
        record("create", &result);

        match &result {
            Ok(document) => tracing::info!(
                document_id = %document.id,
                file_name = %file_name,
                "Document created"
            ),
            Err(e) => tracing::error!(file_name = %file_name, error = %e, "Create document failed"),
        }
        result
    }

    async fn replace(
        &self,
        id: &DocumentId,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError> {
        let url = self.document_url(id);
        let file_name = file.file_name.clone();

        let result: Result<Document, ApiError> = async {
            let form = Self::upload_form(file, expiry_date)?;
            let response = self.client.traced_put(&url).multipart(form).send().await?;
            decode::<Document>(response).await
        }
        .await;
        record("replace", &result);

        match &result {
            Ok(_) => tracing::info!(document_id = %id, file_name = %file_name, "Document replaced"),
            Err(e) => tracing::error!(document_id = %id, error = %e, "Replace document failed"),
        }
        result
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), ApiError> {
        let url = self.document_url(id);

        let result: Result<(), ApiError> = async {
            let response = self.client.traced_delete(&url).send().await?;
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::from_response(status, &body))
            }
        }
        .await;
        record("delete", &result);

        match &result {
            Ok(()) => tracing::info!(document_id = %id, "Document deleted"),
            Err(e) => tracing::error!(document_id = %id, error = %e, "Delete document failed"),
        }
        result
    }
}
