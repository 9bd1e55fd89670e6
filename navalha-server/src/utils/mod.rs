//! Utility modules: error types, logging, time conversion, validation.

pub mod error;
pub mod logger;
pub mod slug;
pub mod time;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResponse, AppResult};
