//! Ringside Server - HTTP API over the match engine
//!
//! This crate is a thin transport layer:
//! - REST routes for the registry, ring, fights and leaderboard
//! - Engine errors mapped to HTTP status codes
//! - Optional JSON snapshot persistence between restarts

mod error;
mod routes;
mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};
use ringside_core::FightPolicy;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// JSON snapshot loaded at start-up and rewritten after each mutation
    pub data_file: Option<PathBuf>,
    /// Seed for the fight draw (None = entropy)
    pub seed: Option<u64>,
    pub policy: FightPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            data_file: None,
            seed: None,
            policy: FightPolicy::default(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Health
        .route("/api/health", get(routes::status::health_handler))
        // Registry
        .route("/api/create-boxer", post(routes::boxers::create_boxer))
        .route("/api/delete-boxer/{id}", delete(routes::boxers::delete_boxer))
        .route(
            "/api/get-boxer-by-id/{id}",
            get(routes::boxers::get_boxer_by_id),
        )
        .route(
            "/api/get-boxer-by-name/{name}",
            get(routes::boxers::get_boxer_by_name),
        )
        .route("/api/boxers", get(routes::boxers::list_boxers))
        // Ring
        .route("/api/enter-ring", post(routes::ring::enter_ring))
        .route("/api/get-boxers", get(routes::ring::get_ring_boxers))
        .route("/api/clear-boxers", post(routes::ring::clear_ring))
        .route(
            "/api/fight",
            get(routes::ring::fight).post(routes::ring::fight),
        )
        // Leaderboard
        .route("/api/leaderboard", get(routes::leaderboard::get_leaderboard))
        // Shared state
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::from_config(&config)?);
    let router = create_router(state);

    tracing::info!("Ringside server starting on http://0.0.0.0:{}", config.port);
    match &config.data_file {
        Some(path) => tracing::info!("Persisting boxers to: {}", path.display()),
        None => tracing::info!("Boxers kept in memory only"),
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
