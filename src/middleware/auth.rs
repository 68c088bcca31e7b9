/**
 * Authentication Middleware
 *
 * Protects routes that require a logged-in caller. The middleware
 * extracts the JWT from the Authorization header, verifies it, checks
 * that the subject still exists in the directory, and attaches an
 * `AuthenticatedUser` to the request extensions.
 *
 * Handlers receive the caller as an explicit value (the `AuthUser`
 * extractor) rather than digging through request context themselves.
 */
use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::sessions::verify_token;
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Caller identity established by the middleware.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

/// Authentication middleware
///
/// Rejects with 401 when the token is missing, malformed, expired, or
/// names a user that no longer exists.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::unauthenticated("Authentication credentials were not provided."))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthenticated("Invalid Authorization header format."))?;

    let claims = verify_token(token)
        .map_err(|e| {
            tracing::debug!("token rejected: {e}");
            ApiError::unauthenticated("Invalid or expired token.")
        })?;

    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| ApiError::unauthenticated("Invalid token subject."))?;

    // The token may outlive the account; the username may also have been
    // renamed since issuance, so take it from the directory.
    let user = get_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("User no longer exists."))?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Extractor handing the authenticated caller to handlers.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser missing from request extensions");
                ApiError::unauthenticated("Authentication credentials were not provided.")
            })
    }
}
