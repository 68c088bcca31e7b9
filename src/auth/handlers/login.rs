/**
 * Login Handler
 *
 * Verifies credentials and issues a bearer token.
 *
 * Unknown username and wrong password both return 401 with the same
 * message, so the endpoint cannot be used to enumerate accounts.
 */
use axum::{extract::State, Json};

use crate::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::auth::sessions::create_token;
use crate::auth::users::get_user_by_username;
use crate::error::ApiError;
use crate::server::state::AppState;

/// `POST /login/`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::validation("Username and password required"));
    }

    let user = get_user_by_username(&state.db_pool, &request.username)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("Invalid credentials"))?;

    let valid = bcrypt::verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("password verification failed: {e}");
        ApiError::Storage(std::io::Error::other(e))
    })?;

    if !valid {
        tracing::debug!(username = %request.username, "login rejected");
        return Err(ApiError::unauthenticated("Invalid credentials"));
    }

    let token = create_token(user.id, &user.username)?;
    tracing::info!(user_id = user.id, username = %user.username, "user logged in");

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}
