//! Session state with change notifications
//!
//! Mirrors the backend session into application-visible state. Callers
//! `init` once with any restored session, `subscribe` for change
//! notifications, and `shutdown` to clear the session and notify
//! subscribers.

use app_core::{AuthResponse, AuthService};
use backend_client::Session;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Session state holder
///
/// Cloneable; all clones observe the same session.
#[derive(Clone)]
pub struct SessionState {
    auth: Arc<AuthService>,
    current: Arc<RwLock<Option<Session>>>,
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionState {
    /// Create session state around an auth service
    pub fn new(auth: Arc<AuthService>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { auth, current: Arc::new(RwLock::new(None)), tx: Arc::new(tx) }
    }

    /// Initialise with a restored session, ensuring the profile row exists
    pub async fn init(&self, restored: Option<Session>) {
        if let Some(session) = &restored {
            if let Err(e) = self.auth.ensure_profile(session).await {
                tracing::warn!(error = %e, "profile check failed during session init");
            }
        }
        self.set(restored).await;
    }

    /// The current session, if signed in
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Whether a user is signed in
    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Subscribe to session changes
    ///
    /// The receiver yields the current value immediately and then every
    /// subsequent sign-in/sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    /// Sign in and publish the new session on success
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResponse<Session> {
        let response = self.auth.sign_in(email, password).await;
        if let Some(session) = &response.data {
            self.set(Some(session.clone())).await;
        }
        response
    }

    /// Register and publish the new session on success
    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResponse<Session> {
        let response = self.auth.sign_up(email, password).await;
        if let Some(session) = &response.data {
            self.set(Some(session.clone())).await;
        }
        response
    }

    /// Sign out, clearing the session regardless of the backend outcome
    pub async fn sign_out(&self) -> AuthResponse<()> {
        let token = self.current.read().await.as_ref().map(|s| s.access_token.clone());

        let response = match token {
            Some(token) => self.auth.sign_out(&token).await,
            None => AuthResponse::ok(()),
        };
        self.set(None).await;
        response
    }

    /// Tear down: clear the session and notify subscribers
    pub async fn shutdown(&self) {
        self.set(None).await;
    }

    async fn set(&self, session: Option<Session>) {
        *self.current.write().await = session.clone();
        // Subscribers may have gone away; that is fine
        let _ = self.tx.send(session);
    }
}
