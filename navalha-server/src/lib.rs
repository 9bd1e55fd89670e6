//! Navalha Server - appointment booking backend for barbershops
//!
//! # Architecture overview
//!
//! The server has two faces: a public storefront where clients find a
//! shop and book a slot, and an authenticated dashboard where owners
//! run their day.
//!
//! - **Scheduling** (`scheduling`): slot grid, recurrence, overlap and
//!   plan quota logic - pure functions, no I/O
//! - **Database** (`db`): embedded SQLite via sqlx, split read/write pools
//! - **Auth** (`auth`): JWT + Argon2 owner accounts
//! - **Billing** (`services`): payment provider checkout integration
//! - **HTTP API** (`api`): storefront and dashboard routes
//!
//! # Module structure
//!
//! ```text
//! navalha-server/src/
//! ├── core/          # config, state, server lifecycle, background tasks
//! ├── auth/          # JWT auth, password hashing
//! ├── scheduling/    # availability engine and plan policy
//! ├── services/      # payment provider client
//! ├── api/           # HTTP routes and handlers
//! ├── utils/         # errors, logging, time, validation
//! └── db/            # pools, migrations, repositories
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod scheduling;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use scheduling::Availability;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    _   __                  ____
   / | / /___ __   ______ _/ / /_  ____ _
  /  |/ / __ `/ | / / __ `/ / __ \/ __ `/
 / /|  / /_/ /| |/ / /_/ / / / / / /_/ /
/_/ |_/\__,_/ |___/\__,_/_/_/ /_/\__,_/
    "#
    );
}
