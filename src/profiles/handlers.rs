/**
 * Profile HTTP Handlers
 *
 * `GET /profile/` returns the caller's profile, creating an empty one
 * on first access. `PUT /profile/` accepts a multipart form with any of
 * `username`, `about`, `profile_pic`; a username change renames the
 * underlying user record.
 */
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::attachments::storage::PROFILE_PICS_DIR;
use crate::auth::users::rename_user;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::profiles::db::{self, Profile};
use crate::server::state::AppState;

/// Profile as serialized to clients.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub profile_pic: Option<String>,
    pub profile_pic_url: Option<String>,
    pub about: Option<String>,
}

impl ProfileResponse {
    fn new(profile: Profile, username: String) -> Self {
        let profile_pic_url = profile.picture_ref.as_deref().map(|r| format!("/media/{r}"));
        Self {
            id: profile.id,
            username,
            profile_pic: profile.picture_ref,
            profile_pic_url,
            about: profile.about,
        }
    }
}

/// `GET /profile/` — get-or-create the caller's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = db::get_or_create(&state.db_pool, caller.id).await?;
    Ok(Json(ProfileResponse::new(profile, caller.username)))
}

/// `PUT /profile/` — update username, picture and/or about text.
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>, ApiError> {
    let mut username: Option<String> = None;
    let mut about: Option<String> = None;
    let mut picture: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?
    {
        match field.name() {
            Some("username") => {
                username = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?,
                );
            }
            Some("about") => {
                about = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?,
                );
            }
            Some("profile_pic") => {
                let name = field.file_name().unwrap_or("profile_pic").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?;
                picture = Some((name, data));
            }
            _ => continue,
        }
    }

    // Make sure the row exists before the partial update.
    db::get_or_create(&state.db_pool, caller.id).await?;

    let display_name = match username.as_deref().filter(|s| !s.is_empty()) {
        Some(new_name) => {
            rename_user(&state.db_pool, caller.id, new_name).await?;
            tracing::info!(user_id = caller.id, %new_name, "username changed");
            new_name.to_string()
        }
        None => caller.username,
    };

    let picture_ref = match &picture {
        Some((name, data)) => Some(state.media.save(PROFILE_PICS_DIR, name, data).await?),
        None => None,
    };

    let profile = db::update(
        &state.db_pool,
        caller.id,
        picture_ref.as_deref(),
        about.as_deref(),
    )
    .await?;

    Ok(Json(ProfileResponse::new(profile, display_name)))
}
