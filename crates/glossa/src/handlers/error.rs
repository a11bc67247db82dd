use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use glossa_core::envelope::Envelope;
use glossa_core::storage::{repository_error_to_status_code, RepositoryError};

/// Generic message carried by every 5xx response.
pub const SERVER_ERROR_MESSAGE: &str = "An error occurred";

pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Status code and client-facing message for this error.
    fn status_and_message(&self) -> (StatusCode, String) {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let message = match repo_error {
                RepositoryError::InvalidData(detail) => detail.clone(),
                other => other.to_string(),
            };
            return (status, message);
        }
        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return (StatusCode::BAD_REQUEST, rejection.body_text());
        }
        if let Some(rejection) = self.0.downcast_ref::<QueryRejection>() {
            return (StatusCode::BAD_REQUEST, rejection.body_text());
        }
        if let Some(rejection) = self.0.downcast_ref::<PathRejection>() {
            return (StatusCode::BAD_REQUEST, rejection.body_text());
        }
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let envelope = if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Request failed");
            Envelope::error(SERVER_ERROR_MESSAGE, Some(message))
        } else {
            tracing::warn!(status = %status, message = %message, "API error");
            Envelope::error(message, None)
        };

        (status, Json(envelope)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
