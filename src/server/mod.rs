//! Server assembly
//!
//! - **`config`** - Environment-driven configuration and database setup
//! - **`state`** - Shared application state
//! - **`init`** - Router construction from state

pub mod config;
pub mod init;
pub mod state;
