//! Owner Appointments API Module
//!
//! The owner's agenda for one shop: day listing, manual entries, status
//! transitions and cleanup.
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/shops/{shop_id}/appointments | GET | agenda (?date=&status=) |
//! | /api/shops/{shop_id}/appointments | POST | manual entry (confirmed) |
//! | /api/shops/{shop_id}/appointments | DELETE | bulk removal by filter |
//! | /api/shops/{shop_id}/appointments/{id}/status | PUT | status transition |
//! | /api/shops/{shop_id}/appointments/{id} | DELETE | remove manual entry |

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops/{shop_id}/appointments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .delete(handler::bulk_delete),
        )
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}", delete(handler::delete))
}
