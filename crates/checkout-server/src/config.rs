//! Server Configuration

use std::path::PathBuf;

use anyhow::Context;
use checkout_core::StaticPlanDirectory;

/// Runtime settings read from the environment
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address (`BIND_ADDR`)
    pub bind_addr: String,

    /// Compiled frontend (`STATIC_DIR`)
    pub static_dir: PathBuf,

    /// JSON catalog to serve (`CATALOG_FILE`); demo catalog when unset
    pub catalog_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            static_dir: PathBuf::from("static"),
            catalog_file: None,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            catalog_file: std::env::var("CATALOG_FILE").ok().map(PathBuf::from),
        }
    }

    /// Load the catalog this server should expose
    pub fn load_catalog(&self) -> anyhow::Result<StaticPlanDirectory> {
        let Some(path) = &self.catalog_file else {
            return Ok(StaticPlanDirectory::demo());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog file {}", path.display()))?;
        StaticPlanDirectory::from_json(&json)
            .with_context(|| format!("parsing catalog file {}", path.display()))
    }
}
