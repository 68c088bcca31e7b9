/**
 * Profile Database Operations
 *
 * Profiles are keyed one-to-one to users. `get_or_create` is
 * race-tolerant: the unique constraint on `user_id` plus an
 * insert-if-absent means two concurrent first accesses still end up
 * with exactly one row.
 */
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub picture_ref: Option<String>,
    pub about: Option<String>,
}

/// Return the user's profile, creating an empty one if absent.
pub async fn get_or_create(pool: &SqlitePool, user_id: i64) -> Result<Profile, sqlx::Error> {
    sqlx::query("INSERT INTO profiles (user_id) VALUES (?) ON CONFLICT(user_id) DO NOTHING")
        .bind(user_id)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, Profile>(
        "SELECT id, user_id, picture_ref, about FROM profiles WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Partial update of the profile's own fields. Unspecified fields keep
/// their prior value; username changes are handled by the identity
/// directory, not here.
pub async fn update(
    pool: &SqlitePool,
    user_id: i64,
    picture_ref: Option<&str>,
    about: Option<&str>,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        UPDATE profiles
        SET picture_ref = COALESCE(?, picture_ref), about = COALESCE(?, about)
        WHERE user_id = ?
        RETURNING id, user_id, picture_ref, about
        "#,
    )
    .bind(picture_ref)
    .bind(about)
    .bind(user_id)
    .fetch_one(pool)
    .await
}
