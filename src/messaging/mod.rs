//! Messaging
//!
//! The core of the system: the flat message store, the conversation
//! queries derived from it, and the access rules governing mutation and
//! download.
//!
//! - **`store`** - Message persistence: create, get, update, delete
//! - **`conversations`** - Inbox and pairwise conversation queries
//! - **`access`** - Capability predicates over `(caller, message)`
//! - **`handlers`** - HTTP handlers for the `/messages/` and
//!   `/conversation/` endpoints

pub mod access;
pub mod conversations;
pub mod handlers;
pub mod store;

pub use store::Message;
