use super::DashboardActions;
use crate::forms::FormError;
use crate::models::DocumentId;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this document?";
pub const MSG_DELETE_FAILED: &str = "Failed to delete document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
}

/// Ask `confirm`, then delete through `actions`, which refreshes the list.
///
/// A failure carries the message to show as a blocking alert.
pub async fn delete_document<A, C>(
    actions: &A,
    id: &DocumentId,
    confirm: C,
) -> Result<DeleteOutcome, FormError>
where
    A: DashboardActions + ?Sized,
    C: FnOnce(&str) -> bool,
{
    if !confirm(DELETE_CONFIRMATION) {
        tracing::debug!(document_id = %id, "Delete cancelled");
        return Ok(DeleteOutcome::Cancelled);
    }

    actions
        .delete(id)
        .await
        .map(|()| DeleteOutcome::Deleted)
        .map_err(|source| FormError::Rejected {
            message: source.user_message(MSG_DELETE_FAILED),
            source,
        })
}
