use crate::config::Settings;
use crate::handlers::{
    app::{health_check, index},
    documents::{delete_handler, replace_handler, replace_page},
    metrics::metrics,
    upload::upload_handler,
};
use crate::services::DocumentClient;
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracker_core::error::AppError;
use tracker_core::middleware::{
    metrics_middleware, request_id_middleware, request_span, security_headers_middleware,
};

/// Request bodies above this are refused before the form sees them. Sits
/// above the 5 MiB file limit so oversize files still get the form's message.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/upload", post(upload_handler))
        .route(
            "/documents/:id/replace",
            get(replace_page).post(replace_handler),
        )
        .route("/documents/:id/delete", post(delete_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        // Outermost, so the span sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let client = DocumentClient::new(settings.api.clone());
        tracing::info!(base_url = %client.base_url(), "Documents API configured");

        let state = AppState::new(Arc::new(client));
        let router = build_router(state);

        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        tracing::info!("Starting tracker-frontend on port {}", self.port);
        axum::serve(self.listener, self.router).await
    }
}
