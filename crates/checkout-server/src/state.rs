//! Application State

use std::sync::Arc;

use checkout_core::PlanDirectory;

/// Catalog source shared across handlers
pub type SharedDirectory = Arc<dyn PlanDirectory + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Where `/plan.php` reads the catalog from
    pub directory: SharedDirectory,
}

impl AppState {
    pub fn new(directory: SharedDirectory) -> Self {
        Self { directory }
    }
}
