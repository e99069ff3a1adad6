//! API Client

use checkout_core::{CheckoutConfig, HttpPlanDirectory, Plan, PlanDirectory};

/// Catalog base URL baked in at build time, like any public frontend setting
const PLAN_API_URL: Option<&str> = option_env!("PLAN_API_URL");
const PLAN_CATALOG_PATH: Option<&str> = option_env!("PLAN_CATALOG_PATH");

/// Catalog client for this deployment.
///
/// Falls back to the page origin because the browser client needs an
/// absolute URL.
pub fn catalog_directory() -> checkout_core::Result<HttpPlanDirectory> {
    let config = CheckoutConfig::from_lookup(|key| match key {
        "PLAN_API_URL" => Some(
            PLAN_API_URL
                .filter(|url| !url.is_empty())
                .map_or_else(origin, str::to_string),
        ),
        "PLAN_CATALOG_PATH" => PLAN_CATALOG_PATH
            .filter(|path| !path.is_empty())
            .map(str::to_string),
        _ => None,
    })?;
    Ok(HttpPlanDirectory::new(&config))
}

/// Fetch the full plan catalog
pub async fn fetch_catalog() -> Result<Vec<Plan>, String> {
    catalog_directory()
        .map_err(|e| e.user_message().to_string())?
        .fetch_catalog()
        .await
        .map_err(|e| e.user_message().to_string())
}

fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}
