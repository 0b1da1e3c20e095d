pub mod app;
pub mod documents;
pub mod metrics;
pub mod page;
pub mod upload;
