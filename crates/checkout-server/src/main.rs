//! plan-checkout Server Binary

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_server::{AppState, ServerConfig, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let directory = config.load_catalog()?;

    match &config.catalog_file {
        Some(path) => tracing::info!(
            "✓ Loaded {} plans from {}",
            directory.plans().len(),
            path.display()
        ),
        None => {
            tracing::warn!("⚠ CATALOG_FILE not set - serving demo catalog");
            for plan in directory.plans() {
                tracing::info!("  Plan {}: {}", plan.id, plan.name);
            }
        }
    }

    let state = AppState::new(Arc::new(directory));
    let router = app(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 plan-checkout server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health     - Health check");
    tracing::info!("  GET  /plan.php   - Plan catalog");
    tracing::info!("  GET  /api/plans  - Plan catalog");
    tracing::info!("  GET  /*          - Frontend ({})", config.static_dir.display());
    tracing::info!("");

    axum::serve(listener, router).await?;

    Ok(())
}
