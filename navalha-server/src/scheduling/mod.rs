//! Availability engine
//!
//! Pure slot, recurrence, overlap and quota logic. No I/O here:
//! repositories load a day's appointments and a shop's rules, these
//! functions decide what is bookable and what may be created.

pub mod availability;
pub mod overlap;
pub mod policy;
pub mod recurrence;
pub mod slots;

// Re-exports
pub use availability::{Availability, calculate};
pub use overlap::{ranges_conflict, rules_conflict};
pub use policy::{PolicyViolation, check_block_creation, check_shop_creation};
pub use recurrence::rule_applies_on;
pub use slots::generate_slots;
