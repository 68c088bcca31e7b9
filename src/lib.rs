//! Directline - Direct-Messaging Backend
//!
//! A small HTTP backend where authenticated users exchange text and
//! file-attachment messages, maintain profiles, and retrieve
//! conversation history.
//!
//! # Module Structure
//!
//! - **`server`** - Configuration, shared state, app assembly
//! - **`routes`** - Router and route tables
//! - **`middleware`** - Bearer-token authentication
//! - **`auth`** - Identity directory, JWT sessions, register/login
//! - **`messaging`** - Message store, conversation queries, access rules
//! - **`attachments`** - Local blob storage and download streaming
//! - **`profiles`** - Per-user profiles with get-or-create semantics
//! - **`error`** - Error taxonomy and HTTP conversion
//!
//! # Access model
//!
//! Listing and creating messages require only authentication; the
//! conversation queries scope results to the caller. Editing and
//! deleting are sender-only and fail with 404 for anyone else, so
//! ownership stays opaque. Downloading an attachment is allowed to
//! either participant and fails with 403 for anyone else.
//!
//! # Usage
//!
//! ```rust,no_run
//! use directline::attachments::MediaStore;
//! use directline::server::{config, init};
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let pool = config::connect_database("sqlite:directline.db").await?;
//! let app = init::create_app(pool, MediaStore::new("media"));
//! // serve `app` with axum
//! # Ok(())
//! # }
//! ```

pub mod attachments;
pub mod auth;
pub mod error;
pub mod messaging;
pub mod middleware;
pub mod profiles;
pub mod routes;
pub mod server;
