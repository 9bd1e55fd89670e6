//! Server Implementation
//!
//! HTTP server startup and shutdown.

use std::net::SocketAddr;

use axum::{Router, middleware};
use tokio_util::sync::CancellationToken;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use tower_http::services::ServeDir;

use crate::auth::require_auth;
use crate::core::{Config, ServerState, tasks};

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the full application router for the given state.
pub fn build_app(state: ServerState) -> Router {
    let uploads = ServeDir::new(state.config.uploads_dir());
    Router::<ServerState>::new()
        // Core APIs
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::public::router())
        // Owner dashboard APIs
        .merge(crate::api::shops::router())
        .merge(crate::api::services::router())
        .merge(crate::api::appointments::router())
        .merge(crate::api::blocked_times::router())
        // Billing APIs
        .merge(crate::api::plans::router())
        .merge(crate::api::subscriptions::router())
        // Auth middleware at router level; require_auth skips the
        // public routes itself.
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        // Shop photos, served straight from disk outside the auth layer.
        .nest_service("/uploads", uploads)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests reuse one state).
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        // Background tasks
        let shutdown_token = CancellationToken::new();
        let sweeper = tasks::spawn_subscription_sweeper(state.clone(), shutdown_token.clone());

        let app = build_app(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Navalha server starting on {}", addr);

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
            shutdown_handle.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
        });

        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await?;

        // Stop background tasks once the listener has drained.
        shutdown_token.cancel();
        let _ = sweeper.await;

        Ok(())
    }
}
