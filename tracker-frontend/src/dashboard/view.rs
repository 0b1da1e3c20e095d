use super::replace::ReplaceModal;
use super::EMPTY_MESSAGE;
use crate::models::{Document, ExpiryStatus};
use crate::state::DocumentStore;
use chrono::{NaiveDate, NaiveDateTime};

/// `MMM d, yyyy`, e.g. `Mar 5, 2024`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_display_timestamp(timestamp: NaiveDateTime) -> String {
    format_display_date(timestamp.date())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub up_to_date: usize,
    pub expiring_soon: usize,
    pub overdue: usize,
}

impl StatusSummary {
    pub fn from_documents(documents: &[Document], today: NaiveDate) -> Self {
        let count = |status: ExpiryStatus| {
            documents
                .iter()
                .filter(|doc| doc.status_on(today) == status)
                .count()
        };

        Self {
            up_to_date: count(ExpiryStatus::UpToDate),
            expiring_soon: count(ExpiryStatus::ExpiringSoon),
            overdue: count(ExpiryStatus::Overdue),
        }
    }

    pub fn total(&self) -> usize {
        self.up_to_date + self.expiring_soon + self.overdue
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    pub id: String,
    pub filename: String,
    pub uploaded_on: String,
    pub expires_on: String,
    pub status: ExpiryStatus,
}

impl DocumentRow {
    pub fn from_document(document: &Document, today: NaiveDate) -> Self {
        Self {
            id: document.id.to_string(),
            filename: document.original_filename.clone(),
            uploaded_on: format_display_timestamp(document.upload_date),
            expires_on: document
                .expiry_date
                .map(format_display_date)
                .unwrap_or_else(|| "—".to_string()),
            status: document.status_on(today),
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn badge_color(&self) -> &'static str {
        self.status.badge_color()
    }
}

/// Open replace modal, as the template sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceModalView {
    pub document_id: String,
    pub filename: Option<String>,
    pub error: Option<String>,
}

/// Everything the dashboard half of the page needs, computed fresh for each
/// render.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub summary: StatusSummary,
    pub rows: Vec<DocumentRow>,
    pub loading: bool,
    pub modal: Option<ReplaceModalView>,
}

impl DashboardView {
    pub fn build(store: &DocumentStore, modal: &ReplaceModal, today: NaiveDate) -> Self {
        let modal = modal.document_id().map(|id| ReplaceModalView {
            document_id: id.to_string(),
            filename: store
                .documents
                .iter()
                .find(|doc| &doc.id == id)
                .map(|doc| doc.original_filename.clone()),
            error: modal.error().map(str::to_owned),
        });

        Self {
            summary: StatusSummary::from_documents(&store.documents, today),
            rows: store
                .documents
                .iter()
                .map(|doc| DocumentRow::from_document(doc, today))
                .collect(),
            loading: store.loading,
            modal,
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(EMPTY_MESSAGE)
    }
}
