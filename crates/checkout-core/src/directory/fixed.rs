//! Static Plan Directory
//!
//! Fixed in-memory catalog. Backs the catalog server and tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal_macros::dec;

use super::PlanDirectory;
use crate::error::{CheckoutError, Result};
use crate::plan::Plan;

/// Catalog held in memory
pub struct StaticPlanDirectory {
    catalog: Vec<Plan>,
    failure: Option<String>,
    fetches: AtomicUsize,
}

impl StaticPlanDirectory {
    pub fn new(catalog: Vec<Plan>) -> Self {
        Self {
            catalog,
            failure: None,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Directory whose every fetch fails (for testing error paths)
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            catalog: Vec::new(),
            failure: Some(reason.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Built-in demo catalog
    pub fn demo() -> Self {
        Self::new(vec![
            Plan::new(1, "Starter")
                .with_prices(dec!(0), dec!(0))
                .with_features(["Up to 50 bookmarks", "1 collection"]),
            Plan::new(2, "Plus")
                .with_prices(dec!(4.99), dec!(49))
                .with_features(["Unlimited bookmarks", "10 collections", "Browser sync"]),
            Plan::new(3, "Pro")
                .with_prices(dec!(10), dec!(100))
                .with_features([
                    "Everything in Plus",
                    "Unlimited collections",
                    "Shared folders",
                    "Priority support",
                ]),
        ])
    }

    /// Parse a catalog from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Vec<Plan> = serde_json::from_str(json)
            .map_err(|e| CheckoutError::Config(format!("invalid catalog JSON: {e}")))?;
        Ok(Self::new(catalog))
    }

    pub fn plans(&self) -> &[Plan] {
        &self.catalog
    }

    /// Number of `fetch_catalog` calls served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PlanDirectory for StaticPlanDirectory {
    async fn fetch_catalog(&self) -> Result<Vec<Plan>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(reason) => Err(CheckoutError::FetchFailure(reason.clone())),
            None => Ok(self.catalog.clone()),
        }
    }

    fn name(&self) -> &str {
        "static"
    }
}
