pub mod document;
pub mod status;
pub mod wire_dates;

pub use document::{Document, DocumentId, FileUpload};
pub use status::ExpiryStatus;
