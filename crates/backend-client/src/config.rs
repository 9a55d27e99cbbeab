//! Backend connection configuration
//!
//! The backend URL and keys come from the environment. When they are not
//! set the application runs against the local fallback store instead, so
//! `from_env` returns `None` rather than inventing defaults.

use std::env;
use std::time::Duration;

/// Environment variable holding the backend base URL
pub const ENV_BACKEND_URL: &str = "DESIGN_LOOM_BACKEND_URL";
/// Environment variable holding the public (anon) API key
pub const ENV_ANON_KEY: &str = "DESIGN_LOOM_ANON_KEY";
/// Environment variable holding the service-role API key
pub const ENV_SERVICE_KEY: &str = "DESIGN_LOOM_SERVICE_KEY";

/// Configuration for the hosted backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g., "https://project.example.co")
    pub url: String,
    /// Public (anon) API key, used for client-scoped calls
    pub anon_key: String,
    /// Service-role API key, used for server-side calls
    pub service_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl BackendConfig {
    /// Create a configuration with the default timeout
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            service_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the service-role key
    pub fn with_service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = Some(key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the configuration from the environment
    ///
    /// Returns `None` when the URL or anon key is absent, which callers
    /// treat as "no backend configured".
    pub fn from_env() -> Option<Self> {
        let url = env::var(ENV_BACKEND_URL).ok()?;
        let anon_key = env::var(ENV_ANON_KEY).ok()?;

        let mut config = Self::new(url, anon_key);
        if let Ok(service_key) = env::var(ENV_SERVICE_KEY) {
            config = config.with_service_key(service_key);
        }
        Some(config)
    }

    /// The key to authenticate server-side calls with
    ///
    /// Prefers the service-role key when present.
    pub fn server_key(&self) -> &str {
        self.service_key.as_deref().unwrap_or(&self.anon_key)
    }
}
