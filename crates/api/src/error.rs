use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use folio_db::StoreError;
use folio_storage::StorageError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain and backend errors and implements [`IntoResponse`] to
/// produce consistent `{ "error", "code" }` JSON bodies. Field-level
/// validation failures additionally carry an `errors` map.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The multipart body could not be read.
    #[error(transparent)]
    Multipart(#[from] MultipartError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Core(CoreError::InvalidFields(errors)) = &self {
            let body = json!({
                "error": "One or more fields are invalid",
                "code": "VALIDATION_ERROR",
                "errors": errors,
            });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidFields(errors) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("{} field(s) are invalid", errors.len()),
                ),
                CoreError::RateLimited { retry_after_ms } => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    format!("Please wait {retry_after_ms} ms before trying again"),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::DataIntegrity(msg) => {
                    tracing::error!(error = %msg, "Stored data failed to decode");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DATA_INTEGRITY",
                        "Stored data is corrupt".to_string(),
                    )
                }
                CoreError::Internal(msg) => internal(msg),
            },

            // --- Backend errors ---
            AppError::Store(StoreError::Database(err)) => classify_sqlx_error(err),
            AppError::Store(StoreError::Unavailable(msg)) => {
                tracing::error!(error = %msg, "Project store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "The project store is unavailable".to_string(),
                )
            }
            AppError::Storage(err) => classify_storage_error(err),
            AppError::Multipart(err) => classify_multipart_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal(msg),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal(msg: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %msg, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (SQLSTATE 23505) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            )
        }
        other => internal(&other.to_string()),
    }
}

/// Classify a multipart read error. A body over the upload limit is a 413;
/// anything else is a malformed request.
fn classify_multipart_error(err: &MultipartError) -> (StatusCode, &'static str, String) {
    match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => (
            StatusCode::PAYLOAD_TOO_LARGE,
            "PAYLOAD_TOO_LARGE",
            "Upload exceeds the maximum allowed size".to_string(),
        ),
        _ => (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.body_text()),
    }
}

/// Classify an asset store error. Path collisions are conflicts; everything
/// else is a server-side failure.
fn classify_storage_error(err: &StorageError) -> (StatusCode, &'static str, String) {
    match err {
        StorageError::AlreadyExists(path) => (
            StatusCode::CONFLICT,
            "ASSET_EXISTS",
            format!("An asset already exists at '{path}'"),
        ),
        StorageError::InvalidPath(path) => internal(&format!("Invalid asset path '{path}'")),
        StorageError::Io(e) => internal(&format!("Asset I/O error: {e}")),
        StorageError::Remote(msg) => {
            tracing::error!(error = %msg, "Object store rejected upload");
            (
                StatusCode::BAD_GATEWAY,
                "UPLOAD_FAILED",
                "Image upload failed".to_string(),
            )
        }
    }
}
