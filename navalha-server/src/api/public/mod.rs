//! Public Storefront API Module
//!
//! Everything a visitor needs to find a shop and book a time. No auth;
//! the middleware skips `/api/public/*`.
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/public/shops | GET | search active shops |
//! | /api/public/shops/{slug} | GET | shop page (shop + services) |
//! | /api/public/shops/{slug}/availability | GET | slots for a date |
//! | /api/public/shops/{slug}/appointments | POST | book a slot |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public/shops", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::search))
        .route("/{slug}", get(handler::shop_page))
        .route("/{slug}/availability", get(handler::availability))
        .route("/{slug}/appointments", post(handler::book))
}
