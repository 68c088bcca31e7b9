//! Authentication HTTP handlers
//!
//! - **`register`** - `POST /register/`
//! - **`login`** - `POST /login/`
//! - **`list`** - `GET /users/` (everyone except the caller)
//! - **`types`** - Request/response bodies shared by the handlers

pub mod list;
pub mod login;
pub mod register;
pub mod types;

pub use list::list_users;
pub use login::login;
pub use register::register;
