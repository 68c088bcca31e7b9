/**
 * Message Store
 *
 * Owns the `messages` table. Messages hold plain sender/receiver ids;
 * anything needing a display name goes through the identity directory.
 *
 * Once created, `sender_id`, `receiver_id` and `created_at` are
 * immutable. Only `text` and `file_ref` can change, via `update`.
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::auth::users::get_user_by_id;
use crate::error::ApiError;

/// A direct message between two users.
///
/// `text` and `file_ref` are each optional; a message carrying neither is
/// still accepted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: Option<String>,
    /// Opaque media-relative path, resolved only at download time
    pub file_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

const MESSAGE_COLUMNS: &str = "id, sender_id, receiver_id, text, file_ref, created_at";

/// Create a message.
///
/// # Errors
///
/// `Validation` when the receiver does not resolve to an existing user or
/// equals the sender.
pub async fn create(
    pool: &SqlitePool,
    sender_id: i64,
    receiver_id: i64,
    text: Option<&str>,
    file_ref: Option<&str>,
) -> Result<Message, ApiError> {
    if receiver_id == sender_id {
        return Err(ApiError::validation(
            "You cannot send a message to yourself.",
        ));
    }

    if get_user_by_id(pool, receiver_id).await?.is_none() {
        return Err(ApiError::validation("Receiver does not exist."));
    }

    let message = sqlx::query_as::<_, Message>(&format!(
        r#"
        INSERT INTO messages (sender_id, receiver_id, text, file_ref, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {MESSAGE_COLUMNS}
        "#
    ))
    .bind(sender_id)
    .bind(receiver_id)
    .bind(text)
    .bind(file_ref)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    tracing::info!(
        message_id = message.id,
        sender_id,
        receiver_id,
        has_file = message.file_ref.is_some(),
        "message created"
    );

    Ok(message)
}

/// Fetch a message by id.
///
/// # Errors
///
/// `NotFound` when no message with that id exists.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Message, ApiError> {
    sqlx::query_as::<_, Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ApiError::not_found("No Message matches the given query."))
}

/// Partial update: unspecified fields retain their prior value.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    text: Option<&str>,
    file_ref: Option<&str>,
) -> Result<Message, ApiError> {
    sqlx::query_as::<_, Message>(&format!(
        r#"
        UPDATE messages
        SET text = COALESCE(?, text), file_ref = COALESCE(?, file_ref)
        WHERE id = ?
        RETURNING {MESSAGE_COLUMNS}
        "#
    ))
    .bind(text)
    .bind(file_ref)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ApiError::not_found("No Message matches the given query."))
}

/// Hard delete.
///
/// # Errors
///
/// `NotFound` when no row was removed; a second delete of the same id
/// fails.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM messages WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("No Message matches the given query."));
    }

    tracing::info!(message_id = id, "message deleted");
    Ok(())
}
