//! HTTP Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use checkout_core::Plan;

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub plans: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint; `degraded` when the catalog cannot be read
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, plans) = match state.directory.fetch_catalog().await {
        Ok(catalog) => ("healthy", catalog.len()),
        Err(e) => {
            tracing::warn!("Health check: catalog unavailable: {}", e);
            ("degraded", 0)
        }
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        plans,
    })
}

/// Full plan catalog, no filtering or pagination
pub async fn list_plans(
    State(state): State<AppState>,
) -> Result<Json<Vec<Plan>>, (StatusCode, Json<ErrorResponse>)> {
    let catalog = state.directory.fetch_catalog().await.map_err(|e| {
        tracing::error!("Catalog error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.user_message().into(),
                code: "CATALOG_ERROR".into(),
            }),
        )
    })?;

    tracing::debug!(plans = catalog.len(), source = state.directory.name(), "Serving catalog");
    Ok(Json(catalog))
}
