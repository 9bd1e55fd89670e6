//! Owner Service Catalog API Module
//!
//! Nested under the owning shop; every route re-checks ownership.
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/shops/{shop_id}/services | GET | list (inactive included) |
//! | /api/shops/{shop_id}/services | POST | create |
//! | /api/shops/{shop_id}/services/{id} | PUT | update |
//! | /api/shops/{shop_id}/services/{id} | DELETE | soft-delete |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops/{shop_id}/services", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
