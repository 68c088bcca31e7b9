//! Authentication and Identity
//!
//! This module owns user records (the identity directory), JWT session
//! tokens, and the registration/login handlers.
//!
//! - **`users`** - User model and database operations
//! - **`sessions`** - JWT token creation and verification
//! - **`handlers`** - HTTP handlers for `/register/`, `/login/`, `/users/`

pub mod handlers;
pub mod sessions;
pub mod users;

pub use handlers::{list_users, login, register};
