//! Server error types.
//!
//! Maps the failure taxonomy onto HTTP responses: validation failures
//! become 404, persistence and render failures become 500 with the
//! failure description in the body. A missing page is not represented
//! here at all; the handlers recover from it locally.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quill_storage::StorageError;

use crate::render::RenderError;

/// Error type for request handlers.
///
/// Every variant is terminal for the request that produced it; none are
/// retried and none crash the process.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Title failed validation; indistinguishable from an unknown route.
    #[error("Page not found: {0}")]
    NotFound(String),
    /// Page could not be persisted.
    #[error("Failed to save page: {0}")]
    Save(StorageError),
    /// Page could not be rendered.
    #[error("Failed to render page: {0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Save(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ServerError::NotFound("Bad".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_save_failure_maps_to_500() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = ServerError::Save(StorageError::io(io_err, None));

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_save_failure_description_is_non_empty() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = ServerError::Save(StorageError::io(io_err, None));

        assert!(err.to_string().contains("read-only"));
    }
}
