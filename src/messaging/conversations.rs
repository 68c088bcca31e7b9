/**
 * Conversation Resolver
 *
 * Derives ordered message sequences from the flat store. Both query
 * modes sort ascending by `created_at`, ties broken by id, which is
 * insertion order — the result is stable and deterministic.
 */
use sqlx::SqlitePool;

use crate::auth::users::get_user_by_id;
use crate::messaging::store::Message;

/// Inbox-style query for a caller.
///
/// With no counterpart: every message where the caller is sender or
/// receiver. With a counterpart that does not resolve to an existing
/// user: an empty sequence, not an error. Otherwise: the messages
/// exchanged between the pair, in either direction.
pub async fn inbox(
    pool: &SqlitePool,
    caller_id: i64,
    other_user_id: Option<i64>,
) -> Result<Vec<Message>, sqlx::Error> {
    match other_user_id {
        None => {
            sqlx::query_as::<_, Message>(
                r#"
                SELECT id, sender_id, receiver_id, text, file_ref, created_at
                FROM messages
                WHERE sender_id = ? OR receiver_id = ?
                ORDER BY created_at ASC, id ASC
                "#,
            )
            .bind(caller_id)
            .bind(caller_id)
            .fetch_all(pool)
            .await
        }
        Some(other) => {
            if get_user_by_id(pool, other).await?.is_none() {
                return Ok(Vec::new());
            }
            between_unchecked(pool, caller_id, other).await
        }
    }
}

/// Pairwise query by two explicit user ids.
///
/// Either id failing to resolve yields an empty sequence. Performs no
/// authorization check against the requesting caller; any authenticated
/// caller may query any pair.
pub async fn between(
    pool: &SqlitePool,
    user1: i64,
    user2: i64,
) -> Result<Vec<Message>, sqlx::Error> {
    if get_user_by_id(pool, user1).await?.is_none()
        || get_user_by_id(pool, user2).await?.is_none()
    {
        return Ok(Vec::new());
    }

    between_unchecked(pool, user1, user2).await
}

/// Messages exchanged between a pair, both directions, callers already
/// validated.
async fn between_unchecked(
    pool: &SqlitePool,
    user1: i64,
    user2: i64,
) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, sender_id, receiver_id, text, file_ref, created_at
        FROM messages
        WHERE (sender_id = ? AND receiver_id = ?)
           OR (sender_id = ? AND receiver_id = ?)
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user1)
    .bind(user2)
    .bind(user2)
    .bind(user1)
    .fetch_all(pool)
    .await
}
