use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, error, info, warn};

use crate::core::MediaError;

use super::types::ErrorResponse;

/// Maps [`MediaError`] to an HTTP response. Details of forbidden and internal
/// failures are logged here and replaced by a generic message for the client.
#[derive(Debug)]
pub struct ApiError(pub MediaError);

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            MediaError::EmptyCategory(category) => {
                debug!(category = category.as_str(); "No media to navigate");
                return StatusCode::NO_CONTENT.into_response();
            }
            MediaError::NotFound(what) => {
                info!("Not found: {what}");
                (StatusCode::NOT_FOUND, format!("not found: {what}"))
            }
            MediaError::Forbidden(reason) => {
                warn!("Rejected media path: {reason}");
                (StatusCode::FORBIDDEN, String::from("forbidden"))
            }
            MediaError::IoError(msg) | MediaError::ConfigParsingError(msg) => {
                error!("Media request failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, String::from("internal error"))
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
