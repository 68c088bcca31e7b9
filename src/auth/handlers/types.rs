/**
 * Authentication Handler Types
 *
 * Request and response bodies for registration and login.
 */
use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    /// Hashed before storage, never persisted or logged in the clear
    pub password: String,
}

/// Registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the bearer token plus enough identity for the client
/// to label its own messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
}
