/**
 * Server Configuration
 *
 * Configuration comes from environment variables, with defaults that
 * make local development work out of the box:
 *
 * - `DATABASE_URL` - SQLite database (default `sqlite:directline.db`)
 * - `SERVER_PORT`  - listen port (default 8000)
 * - `MEDIA_ROOT`   - attachment storage directory (default `media`)
 * - `JWT_SECRET`   - token signing secret (read in `auth::sessions`)
 */
use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub media_root: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:directline.db".to_string());
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);
        let media_root = std::env::var("MEDIA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("media"));

        Self {
            database_url,
            port,
            media_root,
        }
    }
}

/// Open the connection pool and bring the schema up to date.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect_with(options)
        .await?;

    tracing::info!("database connection pool created");

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

    tracing::info!("database migrations applied");
    Ok(pool)
}
