use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::fmt;

use super::status::ExpiryStatus;
use super::wire_dates;

/// Server-assigned identifier. The documents API emits integers, but the
/// client treats the value as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(id) => Self(id.to_string()),
            RawId::Text(id) => Self(id),
        })
    }
}

/// Read-only copy of a tracked document, as returned by the documents API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub original_filename: String,
    #[serde(deserialize_with = "wire_dates::timestamp")]
    pub upload_date: NaiveDateTime,
    #[serde(default, deserialize_with = "wire_dates::optional_date")]
    pub expiry_date: Option<NaiveDate>,
}

impl Document {
    pub fn status_on(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::derive(self.expiry_date, today)
    }
}

/// A file picked in one of the forms, ready to be sent as a multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

// Keep file contents out of logs.
impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}
