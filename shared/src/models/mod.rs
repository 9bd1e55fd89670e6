//! Data models
//!
//! Shared between navalha-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are
//! Unix milliseconds. JSON field names are camelCase per the public API.

pub mod appointment;
pub mod blocked_time;
pub mod plan;
pub mod service;
pub mod shop;
pub mod subscription;
pub mod user;

// Re-exports
pub use appointment::*;
pub use blocked_time::*;
pub use plan::*;
pub use service::*;
pub use shop::*;
pub use subscription::*;
pub use user::*;
