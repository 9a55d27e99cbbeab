//! Shared application state
//!
//! One struct carries everything the route handlers need. Built once at
//! startup: against the hosted backend when configured, otherwise
//! against the local fallback store.

use app_core::{AuthService, DesignSystemService, ServiceError};
use backend_client::BackendConfig;
use std::sync::Arc;
use storage::{KvConfig, KvStore, LocalStore};

use crate::session::SessionState;

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    /// The design-system service
    pub service: Arc<DesignSystemService>,
    /// Session state (absent when no backend/auth is configured)
    pub session: Option<SessionState>,
}

impl AppState {
    /// Build state against the hosted backend
    pub fn remote(config: BackendConfig) -> Result<Self, ServiceError> {
        let service = DesignSystemService::remote(config.clone())?;
        let auth = AuthService::new(config)?;

        Ok(Self {
            service: Arc::new(service),
            session: Some(SessionState::new(Arc::new(auth))),
        })
    }

    /// Build state against the local fallback store
    pub fn local(kv_path: &str) -> Result<Self, ServiceError> {
        let kv = KvStore::new(KvConfig::new(kv_path)).map_err(storage::LocalStoreError::from)?;
        let store = LocalStore::new(kv);

        Ok(Self { service: Arc::new(DesignSystemService::local(store)), session: None })
    }

    /// Build state with an in-memory store (for tests)
    pub fn in_memory() -> Result<Self, ServiceError> {
        let store = LocalStore::in_memory()?;
        Ok(Self { service: Arc::new(DesignSystemService::local(store)), session: None })
    }

    /// Build state from the environment: remote when the backend is
    /// configured, local fallback otherwise
    pub fn from_env() -> Result<Self, ServiceError> {
        match BackendConfig::from_env() {
            Some(config) => {
                tracing::info!(url = %config.url, "using hosted backend");
                Self::remote(config)
            }
            None => {
                tracing::info!("no backend configured, using local fallback store");
                Self::local("design_loom.db")
            }
        }
    }
}
