use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::warn;

use crate::conf::AuthConfig;

use super::types::ErrorResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected,
}

/// Decides whether a request may reach the media handlers.
pub trait AccessGate: Send + Sync {
    fn authorize(&self, headers: &HeaderMap) -> Admission;
}

/// Admits everything. Used when no admin token is configured.
pub struct OpenGate;

impl AccessGate for OpenGate {
    fn authorize(&self, _headers: &HeaderMap) -> Admission {
        Admission::Admitted
    }
}

/// Admits requests carrying `Authorization: Bearer <token>`.
pub struct TokenGate {
    token: String,
}

impl TokenGate {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AccessGate for TokenGate {
    fn authorize(&self, headers: &HeaderMap) -> Admission {
        let presented = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        match presented {
            Some(token) if tokens_match(token.as_bytes(), self.token.as_bytes()) => {
                Admission::Admitted
            }
            _ => Admission::Rejected,
        }
    }
}

/// Compares in time independent of where the first mismatch is.
fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

pub fn gate_from_config(auth: &AuthConfig) -> Arc<dyn AccessGate> {
    match &auth.admin_token {
        Some(token) if !token.is_empty() => Arc::new(TokenGate::new(token.clone())),
        _ => {
            warn!("No auth.admin_token configured, media endpoints are open to everyone");
            Arc::new(OpenGate)
        }
    }
}

/// Middleware that stops rejected requests before any handler runs.
pub async fn require_admission(
    State(gate): State<Arc<dyn AccessGate>>,
    request: Request,
    next: Next,
) -> Response {
    match gate.authorize(request.headers()) {
        Admission::Admitted => next.run(request).await,
        Admission::Rejected => {
            warn!("Rejected unauthorized request to {}", request.uri().path());
            let body = ErrorResponse {
                error: String::from("unauthorized"),
            };
            (StatusCode::UNAUTHORIZED, Json(body)).into_response()
        }
    }
}
