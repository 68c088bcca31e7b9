/**
 * Router Configuration
 *
 * All HTTP routes in one place.
 *
 * ## Public
 * - `POST /register/` - create account
 * - `POST /login/`    - issue bearer token
 * - `GET  /media/{*path}` - raw stored blobs (profile pictures, inline
 *   attachment links)
 *
 * ## Authenticated (bearer token)
 * - `GET  /users/`                    - everyone except the caller
 * - `GET|POST /messages/`             - inbox / send
 * - `GET  /conversation/`             - messages between two users
 * - `DELETE /messages/{id}/delete/`   - sender-only delete
 * - `PATCH|PUT /messages/{id}/edit/`  - sender-only edit
 * - `GET  /messages/{id}/download/`   - participant-only download
 * - `GET|PUT /profile/`               - own profile
 */
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::attachments::download_message;
use crate::auth::{list_users, login, register};
use crate::error::ApiError;
use crate::messaging::handlers::{
    conversation_between, create_message, delete_message, edit_message, list_messages,
};
use crate::middleware::auth_middleware;
use crate::profiles::{get_profile, update_profile};
use crate::server::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/register/", post(register))
        .route("/login/", post(login));

    let protected = Router::new()
        .route("/users/", get(list_users))
        .route("/messages/", get(list_messages).post(create_message))
        .route("/conversation/", get(conversation_between))
        .route("/messages/{id}/delete/", delete(delete_message))
        .route("/messages/{id}/edit/", patch(edit_message).put(edit_message))
        .route("/messages/{id}/download/", get(download_message))
        .route("/profile/", get(get_profile).put(update_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .nest_service("/media", ServeDir::new(state.media.root()))
        .fallback(|| async { ApiError::not_found("Not Found") })
        .with_state(state)
}
