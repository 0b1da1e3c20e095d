//! In-memory `DocumentApi` that records every call.

use crate::models::{wire_dates, Document, DocumentId, FileUpload};
use crate::services::{ApiError, DocumentApi};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create {
        file_name: String,
        expiry_date: Option<String>,
    },
    Replace {
        id: String,
        file_name: String,
        expiry_date: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Default)]
struct Inner {
    documents: Vec<Document>,
    calls: Vec<Call>,
    next_id: u64,
    fail_list: Option<ApiError>,
    fail_create: Option<ApiError>,
    fail_replace: Option<ApiError>,
    fail_delete: Option<ApiError>,
}

#[derive(Default)]
pub struct RecordingApi {
    inner: Mutex<Inner>,
}

pub fn sample_document(id: &str, name: &str, expiry_date: Option<NaiveDate>) -> Document {
    Document {
        id: DocumentId::from(id),
        original_filename: name.to_string(),
        upload_date: NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap(),
        expiry_date,
    }
}

impl RecordingApi {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        let api = Self::default();
        {
            let mut inner = api.inner.lock().unwrap();
            inner.next_id = documents.len() as u64;
            inner.documents = documents;
        }
        api
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::List).count()
    }

    pub fn creates(&self) -> Vec<(String, Option<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create {
                    file_name,
                    expiry_date,
                } => Some((file_name, expiry_date)),
                _ => None,
            })
            .collect()
    }

    pub fn fail_next_list(&self, err: ApiError) {
        self.inner.lock().unwrap().fail_list = Some(err);
    }

    pub fn fail_next_create(&self, err: ApiError) {
        self.inner.lock().unwrap().fail_create = Some(err);
    }

    pub fn fail_next_replace(&self, err: ApiError) {
        self.inner.lock().unwrap().fail_replace = Some(err);
    }

    pub fn fail_next_delete(&self, err: ApiError) {
        self.inner.lock().unwrap().fail_delete = Some(err);
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound {
        detail: Some("Document not found".to_string()),
    }
}

#[async_trait]
impl DocumentApi for RecordingApi {
    async fn list(&self) -> Result<Vec<Document>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::List);
        match inner.fail_list.take() {
            Some(err) => Err(err),
            None => Ok(inner.documents.clone()),
        }
    }

    async fn create(
        &self,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Create {
            file_name: file.file_name.clone(),
            expiry_date: expiry_date.clone(),
        });
        if let Some(err) = inner.fail_create.take() {
            return Err(err);
        }

        inner.next_id += 1;
        let mut document = sample_document(&inner.next_id.to_string(), &file.file_name, None);
        document.expiry_date = expiry_date.as_deref().and_then(wire_dates::parse_date);
        inner.documents.push(document.clone());
        Ok(document)
    }

    async fn replace(
        &self,
        id: &DocumentId,
        file: FileUpload,
        expiry_date: Option<String>,
    ) -> Result<Document, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Replace {
            id: id.to_string(),
            file_name: file.file_name.clone(),
            expiry_date: expiry_date.clone(),
        });
        if let Some(err) = inner.fail_replace.take() {
            return Err(err);
        }

        let document = inner
            .documents
            .iter_mut()
            .find(|doc| &doc.id == id)
            .ok_or_else(not_found)?;
        document.original_filename = file.file_name;
        if let Some(date) = expiry_date.as_deref().and_then(wire_dates::parse_date) {
            document.expiry_date = Some(date);
        }
        Ok(document.clone())
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete { id: id.to_string() });
        if let Some(err) = inner.fail_delete.take() {
            return Err(err);
        }

        let before = inner.documents.len();
        inner.documents.retain(|doc| &doc.id != id);
        if inner.documents.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
