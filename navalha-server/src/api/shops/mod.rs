//! Owner Shops API Module
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/shops | GET | my shops |
//! | /api/shops | POST | create (plan-gated) |
//! | /api/shops/{shop_id} | GET | owned shop detail |
//! | /api/shops/{shop_id} | PUT | partial update |
//! | /api/shops/{shop_id} | DELETE | soft-delete |
//! | /api/shops/{shop_id}/photo | POST | multipart photo upload |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{shop_id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{shop_id}/photo", post(handler::upload_photo))
}
