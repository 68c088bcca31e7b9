/**
 * Attachment Download
 *
 * `GET /messages/{id}/download/` — streams a message's attachment to a
 * participant of that message.
 *
 * The file is streamed rather than buffered; the handle is closed when
 * the response body is dropped, whether transmission completed or the
 * client went away.
 */
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::attachments::storage::download_name;
use crate::error::ApiError;
use crate::messaging::{access, store};
use crate::middleware::AuthUser;
use crate::server::state::AppState;

/// Stream an attachment.
///
/// # Errors
///
/// * `NotFound` - unknown message id, or the message has no attachment
/// * `Forbidden` - caller is neither sender nor receiver
pub async fn download_message(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let message = store::get(&state.db_pool, id).await?;
    access::ensure_participant(caller.id, &message)?;

    let file_ref = message
        .file_ref
        .as_deref()
        .ok_or_else(|| ApiError::not_found("No File"))?;

    let path = state.media.resolve(file_ref)?;
    let file = File::open(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            tracing::warn!(message_id = id, %file_ref, "attachment ref points at missing file");
            ApiError::not_found("No File")
        } else {
            ApiError::Storage(e)
        }
    })?;

    let filename = download_name(file_ref);
    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(body)
        .map_err(|e| {
            tracing::error!("failed to build download response: {e}");
            ApiError::Storage(std::io::Error::other(e))
        })
}
