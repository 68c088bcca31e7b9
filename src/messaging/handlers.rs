/**
 * Messaging HTTP Handlers
 *
 * Handlers for creating, listing, editing and deleting messages, plus
 * the pairwise conversation endpoint. Message bodies arrive as
 * multipart forms (`receiver`, `text`, `file`) so text and attachment
 * can travel together.
 *
 * Responses decorate the stored ids with usernames resolved through the
 * identity directory.
 */
use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::attachments::storage::UPLOADS_DIR;
use crate::auth::users::usernames_for;
use crate::error::ApiError;
use crate::messaging::store::Message;
use crate::messaging::{access, conversations, store};
use crate::middleware::AuthUser;
use crate::server::state::AppState;

/// Message as serialized to clients.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub sender: i64,
    pub receiver: i64,
    pub text: Option<String>,
    pub file: Option<String>,
    pub file_url: Option<String>,
    pub download_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub sender_username: String,
    pub receiver_username: String,
}

impl MessageResponse {
    fn new(message: Message, usernames: &HashMap<i64, String>) -> Self {
        let file_url = message.file_ref.as_deref().map(|r| format!("/media/{r}"));
        let download_url = message
            .file_ref
            .as_ref()
            .map(|_| format!("/messages/{}/download/", message.id));

        Self {
            id: message.id,
            sender: message.sender_id,
            receiver: message.receiver_id,
            sender_username: usernames
                .get(&message.sender_id)
                .cloned()
                .unwrap_or_default(),
            receiver_username: usernames
                .get(&message.receiver_id)
                .cloned()
                .unwrap_or_default(),
            text: message.text,
            file: message.file_ref,
            file_url,
            download_url,
            timestamp: message.created_at,
        }
    }
}

/// Resolve display names for a batch of messages in one query.
async fn decorate(
    pool: &SqlitePool,
    messages: Vec<Message>,
) -> Result<Vec<MessageResponse>, ApiError> {
    let mut ids: Vec<i64> = messages
        .iter()
        .flat_map(|m| [m.sender_id, m.receiver_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let usernames = usernames_for(pool, &ids).await?;
    Ok(messages
        .into_iter()
        .map(|m| MessageResponse::new(m, &usernames))
        .collect())
}

async fn decorate_one(pool: &SqlitePool, message: Message) -> Result<MessageResponse, ApiError> {
    let usernames = usernames_for(pool, &[message.sender_id, message.receiver_id]).await?;
    Ok(MessageResponse::new(message, &usernames))
}

/// Fields accepted by the create and edit forms.
#[derive(Debug, Default)]
struct MessageForm {
    receiver: Option<String>,
    text: Option<String>,
    file: Option<(String, Bytes)>,
}

async fn parse_message_form(mut multipart: Multipart) -> Result<MessageForm, ApiError> {
    let mut form = MessageForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?
    {
        match field.name() {
            Some("receiver") => {
                form.receiver = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?,
                );
            }
            Some("text") => {
                form.text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?,
                );
            }
            Some("file") => {
                let name = field.file_name().unwrap_or("file").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?;
                form.file = Some((name, data));
            }
            _ => continue,
        }
    }

    Ok(form)
}

/// `POST /messages/` — create a message.
pub async fn create_message(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let form = parse_message_form(multipart).await?;

    let receiver_id: i64 = form
        .receiver
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("Receiver id is required."))?
        .parse()
        .map_err(|_| ApiError::validation("Receiver does not exist."))?;

    let file_ref = match &form.file {
        Some((name, data)) => Some(state.media.save(UPLOADS_DIR, name, data).await?),
        None => None,
    };

    let message = store::create(
        &state.db_pool,
        caller.id,
        receiver_id,
        form.text.as_deref(),
        file_ref.as_deref(),
    )
    .await?;

    let response = decorate_one(&state.db_pool, message).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Debug, Deserialize)]
pub struct InboxQuery {
    /// Optional counterpart; empty or unresolvable values scope the
    /// inbox down to nothing rather than erroring.
    pub user_id: Option<String>,
}

/// `GET /messages/?user_id=` — the caller's conversation history,
/// optionally scoped to one counterpart.
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Query(params): Query<InboxQuery>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let messages = match params.user_id.as_deref().filter(|s| !s.is_empty()) {
        None => conversations::inbox(&state.db_pool, caller.id, None).await?,
        Some(raw) => match raw.parse::<i64>() {
            Ok(other) => conversations::inbox(&state.db_pool, caller.id, Some(other)).await?,
            // A counterpart that cannot even be an id resolves to nobody.
            Err(_) => Vec::new(),
        },
    };

    Ok(Json(decorate(&state.db_pool, messages).await?))
}

#[derive(Debug, Deserialize)]
pub struct PairQuery {
    pub user1: Option<String>,
    pub user2: Option<String>,
}

/// `GET /conversation/?user1=&user2=` — messages between two explicit
/// users. Missing or unresolvable ids yield an empty list, never an
/// error.
pub async fn conversation_between(
    State(state): State<AppState>,
    _caller: AuthUser,
    Query(params): Query<PairQuery>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let parse = |v: Option<&str>| v.filter(|s| !s.is_empty()).and_then(|s| s.parse::<i64>().ok());

    let messages = match (
        parse(params.user1.as_deref()),
        parse(params.user2.as_deref()),
    ) {
        (Some(user1), Some(user2)) => conversations::between(&state.db_pool, user1, user2).await?,
        _ => Vec::new(),
    };

    Ok(Json(decorate(&state.db_pool, messages).await?))
}

/// `PATCH/PUT /messages/{id}/edit/` — sender-only partial edit of text
/// and/or file.
pub async fn edit_message(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = store::get(&state.db_pool, id).await?;
    access::ensure_sender(caller.id, &message)?;

    let form = parse_message_form(multipart).await?;
    let file_ref = match &form.file {
        Some((name, data)) => Some(state.media.save(UPLOADS_DIR, name, data).await?),
        None => None,
    };

    let updated = store::update(
        &state.db_pool,
        id,
        form.text.as_deref(),
        file_ref.as_deref(),
    )
    .await?;

    Ok(Json(decorate_one(&state.db_pool, updated).await?))
}

/// `DELETE /messages/{id}/delete/` — sender-only hard delete.
pub async fn delete_message(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let message = store::get(&state.db_pool, id).await?;
    access::ensure_sender(caller.id, &message)?;

    store::delete(&state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
