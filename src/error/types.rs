/**
 * API Error Types
 *
 * One enum covers the whole error taxonomy surfaced to clients:
 *
 * - `Validation` - missing or invalid input (absent receiver, self-send)
 * - `Unauthenticated` - missing or invalid credentials
 * - `Forbidden` - authenticated but not allowed (e.g. downloading a
 *   message the caller is not a participant of)
 * - `NotFound` - unresolvable id, or an authorization-scoped absence
 *   (editing someone else's message looks identical to editing a message
 *   that does not exist)
 *
 * Infrastructure failures (`Database`, `Storage`, `Token`) map to 500 and
 * never leak their cause to the client; the cause is logged instead.
 */
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Storage(_) | ApiError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the JSON `detail` field of the response.
    ///
    /// Internal errors get an opaque message; the real cause is logged
    /// where the error is converted.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Database(_) | ApiError::Storage(_) | ApiError::Token(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Shorthand constructors used by handlers.
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ApiError::Forbidden(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        ApiError::Unauthenticated(msg.into())
    }
}
