//! Plan Catalog API Module
//!
//! Public pricing page data. No auth; the middleware lists
//! `/api/plans` as a public route.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/plans", get(handler::list))
}
