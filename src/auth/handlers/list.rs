/**
 * User Listing Handler
 *
 * `GET /users/` — the contact picker: every registered user except the
 * caller, with profile picture if one is set.
 */
use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::users::list_users_except;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::server::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub id: i64,
    pub username: String,
    pub profile_pic: Option<String>,
    pub profile_pic_url: Option<String>,
}

pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<UserListResponse>>, ApiError> {
    let users = list_users_except(&state.db_pool, caller.id).await?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| {
                let profile_pic_url = u.picture_ref.as_deref().map(|r| format!("/media/{r}"));
                UserListResponse {
                    id: u.id,
                    username: u.username,
                    profile_pic: u.picture_ref,
                    profile_pic_url,
                }
            })
            .collect(),
    ))
}
