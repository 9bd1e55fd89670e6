//! Shared types for the Navalha platform
//!
//! Domain models, time-of-day types and ID/timestamp helpers used by the
//! server and by API consumers. DB row derives are behind the `db` feature
//! so non-database consumers stay lightweight.

pub mod models;
pub mod time;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use time::{TimeOfDay, Weekday, WeekdaySet};
