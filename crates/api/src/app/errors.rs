use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tienda_core::CatalogError;

/// Map a domain error to an HTTP response.
///
/// `Internal` already carries only its generic message; the real cause was
/// logged where the error was classified.
pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        CatalogError::Conflict(detail) => json_error(StatusCode::CONFLICT, "conflict", detail),
        CatalogError::NotFound { .. } => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        CatalogError::Internal => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
