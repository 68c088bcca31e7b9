/**
 * Application Initialization
 *
 * Builds the router from its parts. Integration tests call
 * `create_app` directly with their own pool and media directory.
 */
use axum::Router;
use sqlx::SqlitePool;

use crate::attachments::MediaStore;
use crate::routes::router::create_router;
use crate::server::state::AppState;

/// Assemble the application router.
pub fn create_app(db_pool: SqlitePool, media: MediaStore) -> Router {
    let state = AppState { db_pool, media };
    create_router(state)
}
