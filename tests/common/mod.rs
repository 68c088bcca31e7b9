//! Common test utilities
//!
//! Each test spins up the full router against its own temporary SQLite
//! database and media directory, so tests are isolated and need no
//! external services.

use axum_test::TestServer;
use serde_json::json;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;

use directline::attachments::MediaStore;
use directline::server::init::create_app;

pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    // Held so the database and media files outlive the test body.
    _dir: TempDir,
}

/// Build the app on a fresh temp database with migrations applied.
pub async fn spawn() -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .expect("failed to open test database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let media = MediaStore::new(dir.path().join("media"));
    let server = TestServer::new(create_app(pool.clone(), media)).expect("failed to build server");

    TestApp {
        server,
        pool,
        _dir: dir,
    }
}

/// Registered user handle for tests: id plus a valid bearer token.
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Register a user and log them in.
pub async fn signup(app: &TestApp, username: &str) -> TestUser {
    let response = app
        .server
        .post("/register/")
        .json(&json!({ "username": username, "password": "password123" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let response = app
        .server
        .post("/login/")
        .json(&json!({ "username": username, "password": "password123" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    TestUser {
        id: body["user_id"].as_i64().expect("user_id in login response"),
        token: body["token"].as_str().expect("token in login response").to_string(),
    }
}
