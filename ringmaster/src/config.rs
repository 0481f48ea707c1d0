//! Bot configuration.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use ringmaster::BotConfig;
//!
//! let config = BotConfig::new()
//!     .with_api_base_url("http://backend:9000/api/")
//!     .with_request_timeout(Duration::from_secs(10));
//! assert_eq!(config.api_base_url(), "http://backend:9000/api/");
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    api_base_url: String,
    storage_dir: PathBuf,
    request_timeout: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/".to_string(),
            storage_dir: std::env::temp_dir(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl BotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL of the model-lifecycle REST backend.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Directory where prediction artifacts are materialized before delivery.
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Client-level timeout applied to every backend request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
