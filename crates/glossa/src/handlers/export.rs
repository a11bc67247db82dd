//! Export snapshot download.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use glossa_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::state::AppState;

/// Stream the export snapshot (GET /api/translations/export).
///
/// Errors use a bare `{ "error": ... }` body rather than the envelope.
pub async fn download_export(State(state): State<AppState>) -> Response {
    match state.translations.export_stream().await {
        Ok(stream) => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (
                    header::CONTENT_DISPOSITION,
                    "inline; filename=\"translations.json\"",
                ),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            Body::from_stream(stream),
        )
            .into_response(),
        Err(err) => export_error_response(&err),
    }
}

fn export_error_response(err: &RepositoryError) -> Response {
    let status = StatusCode::from_u16(repository_error_to_status_code(err))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if err.is_not_found() {
        "Translations file not found.".to_string()
    } else {
        tracing::error!(error = %err, "Export download failed");
        err.to_string()
    };

    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
