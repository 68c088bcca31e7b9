/**
 * User Model and Database Operations
 *
 * The identity directory. Messages and profiles reference users by id and
 * come back to this module whenever a display name is needed.
 */
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::ApiError;

/// User record as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique, stable user id
    pub id: i64,
    /// Unique, mutable username
    pub username: String,
    /// Bcrypt hash, never serialized into responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Errors
///
/// Returns `ApiError::Validation` when the username is already taken,
/// `ApiError::Database` on any other failure.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<User, ApiError> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash, created_at)
        VALUES (?, ?, ?)
        RETURNING id, username, password_hash, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::validation("Username is already taken.")
        }
        _ => ApiError::Database(e),
    })?;

    Ok(user)
}

/// Get user by id, `None` if absent.
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Get user by username, `None` if absent.
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// All users except the given one, with their profile picture if any.
///
/// Backs the `/users/` contact-picker endpoint.
pub async fn list_users_except(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<UserListing>, sqlx::Error> {
    sqlx::query_as::<_, UserListing>(
        r#"
        SELECT u.id, u.username, p.picture_ref
        FROM users u
        LEFT JOIN profiles p ON p.user_id = u.id
        WHERE u.id != ?
        ORDER BY u.username ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Directory entry returned by `list_users_except`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserListing {
    pub id: i64,
    pub username: String,
    pub picture_ref: Option<String>,
}

/// Rename a user.
///
/// Uniqueness is enforced only by the directory's constraint; a collision
/// surfaces as `Validation`.
pub async fn rename_user(pool: &SqlitePool, id: i64, username: &str) -> Result<(), ApiError> {
    let result = sqlx::query("UPDATE users SET username = ? WHERE id = ?")
        .bind(username)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::validation("Username is already taken.")
            }
            _ => ApiError::Database(e),
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("User does not exist."));
    }

    Ok(())
}

/// Resolve usernames for a set of user ids.
///
/// Messages store plain ids; handlers call this when decorating responses
/// with display names. Ids that do not resolve are simply absent from the
/// returned map.
pub async fn usernames_for(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<HashMap<i64, String>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut builder: sqlx::QueryBuilder<sqlx::Sqlite> =
        sqlx::QueryBuilder::new("SELECT id, username FROM users WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let rows: Vec<(i64, String)> = builder.build_query_as().fetch_all(pool).await?;
    Ok(rows.into_iter().collect())
}
