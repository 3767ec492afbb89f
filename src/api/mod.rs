mod error;
mod gate;
mod handlers;
mod types;

pub use gate::{AccessGate, Admission, OpenGate, TokenGate, gate_from_config};

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use log::info;
use tower_http::trace::TraceLayer;

use crate::core::MediaError;
use crate::service::MediaService;

pub struct MediaApi {
    service: Arc<MediaService>,
    gate: Arc<dyn AccessGate>,
}

impl MediaApi {
    /// Build the API with the gate described by the service's auth config.
    pub fn new(service: MediaService) -> Self {
        let gate = gate_from_config(&service.config().auth);
        Self::with_gate(service, gate)
    }

    pub fn with_gate(service: MediaService, gate: Arc<dyn AccessGate>) -> Self {
        Self {
            service: Arc::new(service),
            gate,
        }
    }

    pub fn router(&self) -> Router {
        let gated = Router::new()
            .route("/auth", get(handlers::auth))
            .route("/api/media/next/{category}/{filename}", get(handlers::next))
            .route("/api/media/prev/{category}/{filename}", get(handlers::prev))
            .route("/api/media/{category}/{filename}", get(handlers::fetch))
            .route_layer(middleware::from_fn_with_state(
                self.gate.clone(),
                gate::require_admission,
            ));

        Router::new()
            .route("/health", get(handlers::health))
            .merge(gated)
            .fallback(handlers::not_found)
            .layer(DefaultBodyLimit::max(
                self.service.config().server.max_upload_size,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.service.clone())
    }

    pub async fn serve(self, addr: &str) -> Result<(), MediaError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| MediaError::IoError(format!("binding to {addr}: {e}")))?;
        info!("Server is listening on {addr}");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| MediaError::IoError(format!("serving: {e}")))?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
