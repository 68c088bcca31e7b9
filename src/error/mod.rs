//! Error Module
//!
//! Defines the error taxonomy shared by every handler and its conversion
//! into HTTP responses.
//!
//! - **`types`** - The `ApiError` enum and status-code mapping
//! - **`conversion`** - `IntoResponse` implementation (JSON `detail` body)

pub mod conversion;
pub mod types;

pub use types::ApiError;

/// Convenience alias used throughout the handlers.
pub type ApiResult<T> = Result<T, ApiError>;
