//! Subscriptions API Module
//!
//! Checkout starts a `pending` subscription and a payment-processor
//! preference; the back-URL flow confirms it via activate.
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/subscriptions/current | GET | my subscription + plan |
//! | /api/subscriptions/checkout | POST | start checkout |
//! | /api/subscriptions/{id}/activate | POST | confirm payment |
//! | /api/subscriptions/cancel | POST | cancel active subscription |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/subscriptions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/current", get(handler::current))
        .route("/checkout", post(handler::checkout))
        .route("/{id}/activate", post(handler::activate))
        .route("/cancel", post(handler::cancel))
}
