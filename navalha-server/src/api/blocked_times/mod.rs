//! Owner Blocked Times API Module
//!
//! Rules carving time out of a shop's bookable day. Creation is the
//! most guarded write in the system: field validation, plan policy,
//! then overlap detection, all inside one write transaction.
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/shops/{shop_id}/blockedTimes | GET | list rules (newest first) |
//! | /api/shops/{shop_id}/blockedTimes | POST | create rule |
//! | /api/shops/{shop_id}/blockedTimes/{id} | DELETE | remove rule |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops/{shop_id}/blockedTimes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::delete))
}
