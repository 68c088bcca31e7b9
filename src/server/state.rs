/**
 * Application State
 *
 * Central state container handed to every handler. Both fields are
 * cheap to clone: the pool is reference-counted and the media store is
 * a path.
 */
use sqlx::SqlitePool;

use crate::attachments::MediaStore;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub media: MediaStore,
}
