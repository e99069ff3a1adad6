//! Plan Directory
//!
//! Sources of the plan catalog. The checkout view only ever asks for the
//! whole catalog and scans it itself.

mod fixed;
mod http;

pub use fixed::StaticPlanDirectory;
pub use http::HttpPlanDirectory;

use async_trait::async_trait;

use crate::error::Result;
use crate::plan::Plan;

/// Plan catalog source (Strategy pattern)
///
/// Browser futures are not `Send`, so the trait drops the bound on `wasm32`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PlanDirectory {
    /// Fetch the full, ordered catalog
    async fn fetch_catalog(&self) -> Result<Vec<Plan>>;

    /// Source name for logs
    fn name(&self) -> &str;
}
