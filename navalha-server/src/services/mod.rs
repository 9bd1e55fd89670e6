//! Service layer
//!
//! - [`BillingService`] - payment provider checkout client

pub mod billing;

pub use billing::{BillingService, CheckoutPreference};
