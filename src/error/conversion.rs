/**
 * Error Conversion
 *
 * Converts `ApiError` into an HTTP response. Every error renders as a
 * JSON object with a single `detail` field:
 *
 * ```json
 * {"detail": "You cannot send a message to yourself."}
 * ```
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {self}");
        } else {
            tracing::debug!("request rejected ({}): {self}", status.as_u16());
        }

        let body = serde_json::json!({ "detail": self.detail() });
        (status, Json(body)).into_response()
    }
}
