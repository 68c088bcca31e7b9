//! Profile Resolver
//!
//! One profile per user, created at registration and recreated on
//! demand if absent. Username changes cascade to the owning user record
//! through the same update path.
//!
//! - **`db`** - Profile persistence, get-or-create semantics
//! - **`handlers`** - `GET /profile/` and `PUT /profile/`

pub mod db;
pub mod handlers;

pub use db::Profile;
pub use handlers::{get_profile, update_profile};
