//! Catalog Endpoint Configuration

use crate::error::{CheckoutError, Result};

/// Default catalog path appended to the API base URL
pub const DEFAULT_CATALOG_PATH: &str = "plan.php";

/// Where the plan catalog lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// API base URL; empty means same origin
    pub api_url: String,

    /// Path of the catalog endpoint relative to `api_url`
    pub catalog_path: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl CheckoutConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            catalog_path: DEFAULT_CATALOG_PATH.into(),
        }
    }

    pub fn with_catalog_path(mut self, path: impl Into<String>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Create from `PLAN_API_URL` and `PLAN_CATALOG_PATH` as resolved by `lookup`.
    ///
    /// Pass `|key| std::env::var(key).ok()` natively; the browser build
    /// passes values baked in at compile time.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup("PLAN_API_URL").unwrap_or_default());
        if let Some(path) = lookup("PLAN_CATALOG_PATH") {
            config.catalog_path = path;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject base URLs that cannot possibly be joined with the catalog path
    pub fn validate(&self) -> Result<()> {
        let base = self.api_url.trim();
        if !base.is_empty() && !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(CheckoutError::Config(format!(
                "PLAN_API_URL must be an http(s) URL, got {base:?}"
            )));
        }
        if self.catalog_path.trim().is_empty() {
            return Err(CheckoutError::Config("catalog path is empty".into()));
        }
        Ok(())
    }

    /// Full catalog URL, e.g. `https://api.example.com/plan.php`
    pub fn catalog_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_url.trim().trim_end_matches('/'),
            self.catalog_path.trim().trim_start_matches('/')
        )
    }
}
