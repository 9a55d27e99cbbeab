//! Client for the backend's auth service
//!
//! Wraps the session endpoints: sign-up, password sign-in, sign-out,
//! password recovery, and user fetch/update. Returns explicit results;
//! session bookkeeping lives in the `app-state` crate.

use reqwest::{Client as ReqwestClient, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;
use crate::error::RestError;

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, RestError>;

/// The authenticated user as reported by the auth service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    /// User identifier
    pub id: String,
    /// Email address
    pub email: Option<String>,
    /// Free-form user metadata
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

/// An authenticated session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Bearer token for subsequent calls
    pub access_token: String,
    /// Token type (always "bearer")
    pub token_type: String,
    /// Seconds until the access token expires
    #[serde(default)]
    pub expires_in: u64,
    /// Refresh token
    pub refresh_token: String,
    /// The authenticated user
    pub user: AuthUser,
}

/// Patch shape for user updates
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Metadata to merge into the user record
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

/// Client for the backend auth service
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: ReqwestClient,
    config: BackendConfig,
}

impl AuthClient {
    /// Create a new auth client
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RestError::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    fn with_api_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.config.anon_key)
    }

    fn with_bearer(&self, request: RequestBuilder, access_token: &str) -> RequestBuilder {
        self.with_api_key(request)
            .header("Authorization", format!("Bearer {access_token}"))
    }

    /// Register a new user, returning the created session
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let request = self
            .with_api_key(self.client.post(self.auth_url("signup")))
            .json(&Credentials { email, password });

        decode(send(request).await?).await
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let request = self
            .with_api_key(self.client.post(self.auth_url("token")))
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });

        decode(send(request).await?).await
    }

    /// Invalidate the session behind an access token
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let request = self.with_bearer(self.client.post(self.auth_url("logout")), access_token);
        send(request).await?;
        Ok(())
    }

    /// Trigger a password-reset email
    pub async fn reset_password(&self, email: &str) -> Result<()> {
        let request = self
            .with_api_key(self.client.post(self.auth_url("recover")))
            .json(&RecoverRequest { email });

        send(request).await?;
        Ok(())
    }

    /// Fetch the user behind an access token
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser> {
        let request = self.with_bearer(self.client.get(self.auth_url("user")), access_token);
        decode(send(request).await?).await
    }

    /// Update the user behind an access token
    pub async fn update_user(&self, access_token: &str, patch: &UserPatch) -> Result<AuthUser> {
        let request = self
            .with_bearer(self.client.put(self.auth_url("user")), access_token)
            .json(patch);

        decode(send(request).await?).await
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| RestError::network(format!("Request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RestError::new(status.as_u16(), "AuthError", body));
    }
    Ok(response)
}

async fn decode<T>(response: Response) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let body = response
        .text()
        .await
        .map_err(|e| RestError::decode(format!("Failed to read response: {e}")))?;

    serde_json::from_str(&body).map_err(|e| RestError::decode(format!("Failed to parse JSON: {e}")))
}
