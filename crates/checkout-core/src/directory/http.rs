//! HTTP Plan Directory
//!
//! Fetches the catalog with a single unparameterised GET.

use async_trait::async_trait;

use super::PlanDirectory;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::plan::Plan;

/// Catalog served by a remote endpoint
pub struct HttpPlanDirectory {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPlanDirectory {
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.catalog_url(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PlanDirectory for HttpPlanDirectory {
    async fn fetch_catalog(&self) -> Result<Vec<Plan>> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching plan catalog");

        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckoutError::FetchFailure(format!(
                "catalog endpoint returned {status}"
            )));
        }

        let catalog: Vec<Plan> = response
            .json()
            .await
            .map_err(|e| CheckoutError::FetchFailure(format!("invalid catalog body: {e}")))?;

        tracing::debug!(plans = catalog.len(), "Plan catalog received");
        Ok(catalog)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_config() {
        let directory = HttpPlanDirectory::new(&CheckoutConfig::new("https://api.example.com"));
        assert_eq!(directory.endpoint(), "https://api.example.com/plan.php");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_load_failure() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let directory = HttpPlanDirectory::new(&CheckoutConfig::new(format!("http://{addr}")));
        let err = directory.fetch_catalog().await.unwrap_err();
        assert_eq!(err.user_message(), "Failed to load plan");
    }
}
