//! Attachment Gateway
//!
//! Maps a message's stored file reference to bytes on disk. Storage is a
//! plain directory tree under the configured media root; messages and
//! profiles only ever hold the media-relative path.
//!
//! - **`storage`** - `MediaStore`: save uploads, resolve refs
//! - **`handlers`** - The download endpoint

pub mod handlers;
pub mod storage;

pub use handlers::download_message;
pub use storage::MediaStore;
