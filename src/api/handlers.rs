use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use crate::nav::Direction;
use crate::service::MediaService;

use super::error::ApiError;
use super::types::{ErrorResponse, HealthResponse};

pub async fn health(State(service): State<Arc<MediaService>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        categories_cached: service.cache().cached_categories().await,
    })
}

/// GET /auth
///
/// Lets a client check its credentials; the gate has already run.
pub async fn auth() -> &'static str {
    "Success"
}

/// GET /api/media/{category}/{filename}
///
/// Streams the file with a content type guessed from its extension.
pub async fn fetch(
    State(service): State<Arc<MediaService>>,
    Path((category, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let media = service.fetch(&category, &filename).await?;
    let body = Body::from_stream(ReaderStream::new(media.file));
    Ok((
        [
            (header::CONTENT_TYPE, media.content_type),
            (header::CONTENT_LENGTH, media.len.to_string()),
        ],
        body,
    )
        .into_response())
}

/// GET /api/media/next/{category}/{filename}
///
/// Plain-text `category/filename` of the following entry, 204 when the
/// category has nothing to show.
pub async fn next(
    State(service): State<Arc<MediaService>>,
    Path((category, filename)): Path<(String, String)>,
) -> Result<String, ApiError> {
    navigate(&service, &category, &filename, Direction::Next).await
}

/// GET /api/media/prev/{category}/{filename}
pub async fn prev(
    State(service): State<Arc<MediaService>>,
    Path((category, filename)): Path<(String, String)>,
) -> Result<String, ApiError> {
    navigate(&service, &category, &filename, Direction::Prev).await
}

async fn navigate(
    service: &MediaService,
    category: &str,
    filename: &str,
    direction: Direction,
) -> Result<String, ApiError> {
    let name = service.navigate(category, filename, direction).await?;
    Ok(format!("{category}/{name}"))
}

pub async fn not_found() -> impl IntoResponse {
    let body = ErrorResponse {
        error: String::from("not found"),
    };
    (StatusCode::NOT_FOUND, Json(body))
}
