pub mod config;
pub mod dashboard;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use services::document_client::DocumentApi;
use state::Tracker;
use std::sync::Arc;

/// Shared application state: the tracker that owns the document list.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Tracker>,
}

impl AppState {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self {
            tracker: Arc::new(Tracker::new(api)),
        }
    }
}
