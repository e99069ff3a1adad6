//! plan-checkout HTTP Server
//!
//! Serves the plan catalog consumed by the checkout page, plus the compiled
//! WASM frontend.

pub mod config;
pub mod handlers;
pub mod state;

use std::path::Path;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{health_check, list_plans};
pub use crate::config::ServerConfig;
pub use crate::state::AppState;

/// Build the application router
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Catalog (legacy path kept for existing clients)
        .route("/plan.php", get(list_plans))
        .route("/api/plans", get(list_plans))
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
