//! End-to-end: checkout view loading plans over HTTP from the catalog server.

use std::sync::Arc;

use axum::{Router, http::StatusCode, routing::get};
use checkout_core::{
    CheckoutConfig, CheckoutPhase, CheckoutQuery, HttpPlanDirectory, PaymentView, PlanDirectory,
    StaticPlanDirectory,
};
use checkout_server::{AppState, app};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn catalog_server() -> String {
    let state = AppState::new(Arc::new(StaticPlanDirectory::demo()));
    serve(app(state, "static")).await
}

#[tokio::test]
async fn test_http_directory_reads_served_catalog() {
    let base = catalog_server().await;
    let directory = HttpPlanDirectory::new(&CheckoutConfig::new(&base));

    let catalog = directory.fetch_catalog().await.unwrap();
    let names: Vec<_> = catalog.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Starter", "Plus", "Pro"]);
}

#[tokio::test]
async fn test_api_alias_serves_same_catalog() {
    let base = catalog_server().await;
    let legacy = HttpPlanDirectory::new(&CheckoutConfig::new(&base));
    let api = HttpPlanDirectory::new(&CheckoutConfig::new(&base).with_catalog_path("api/plans"));

    assert_eq!(
        legacy.fetch_catalog().await.unwrap(),
        api.fetch_catalog().await.unwrap()
    );
}

#[tokio::test]
async fn test_yearly_checkout_over_http() {
    let base = catalog_server().await;
    let directory = HttpPlanDirectory::new(&CheckoutConfig::new(&base));

    let mut view = PaymentView::new(CheckoutQuery::from_pairs([
        ("planId", "3"),
        ("billing", "yearly"),
    ]));
    view.load_plan(&directory).await;

    assert!(matches!(view.phase(), CheckoutPhase::PlanReview(_)));
    assert_eq!(view.price_label().as_deref(), Some("£100/yr"));
}

#[tokio::test]
async fn test_server_error_is_load_failure() {
    let router = Router::new().route(
        "/plan.php",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = serve(router).await;
    let directory = HttpPlanDirectory::new(&CheckoutConfig::new(&base));

    let mut view = PaymentView::new(CheckoutQuery::new(Some("3"), None));
    view.load_plan(&directory).await;
    assert_eq!(view.error_message(), Some("Failed to load plan"));
}

#[tokio::test]
async fn test_malformed_body_is_load_failure() {
    let router = Router::new().route("/plan.php", get(|| async { "<html>not json</html>" }));
    let base = serve(router).await;
    let directory = HttpPlanDirectory::new(&CheckoutConfig::new(&base));

    let err = directory.fetch_catalog().await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to load plan");
}

#[tokio::test]
async fn test_health_endpoint() {
    use tower::ServiceExt;

    let state = AppState::new(Arc::new(StaticPlanDirectory::demo()));
    let response = app(state, "static")
        .oneshot(
            axum::http::Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["plans"], 3);
}
