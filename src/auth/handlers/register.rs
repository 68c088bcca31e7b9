/**
 * Registration Handler
 *
 * Creates the user record and, like the rest of the system expects, an
 * empty profile alongside it so first profile access never races with
 * registration.
 */
use axum::{extract::State, http::StatusCode, Json};

use crate::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::auth::users::create_user;
use crate::error::ApiError;
use crate::profiles::db::get_or_create;
use crate::server::state::AppState;

/// `POST /register/`
///
/// # Errors
///
/// * `Validation` - empty username/password, or username already taken
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::validation("Username and password required"));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST).map_err(|e| {
        tracing::error!("password hashing failed: {e}");
        ApiError::Storage(std::io::Error::other(e))
    })?;

    let user = create_user(&state.db_pool, request.username.trim(), &password_hash).await?;
    get_or_create(&state.db_pool, user.id).await?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}
