//! Authentication service
//!
//! Wraps the backend auth client. Every operation returns a uniform
//! `{data, error}` shape instead of throwing, so callers always handle
//! both paths. On sign-in the matching profile row is created lazily if
//! it does not exist yet.

use backend_client::entities::{NewUserProfile, UserProfile};
use backend_client::{AuthClient, BackendConfig, Filters, RestClient, RestError, Session, UserPatch};
use serde::{Deserialize, Serialize};

/// Uniform result shape for auth operations
///
/// Exactly one of `data` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse<T> {
    /// Payload on success
    pub data: Option<T>,
    /// Error message on failure
    pub error: Option<String>,
}

impl<T> AuthResponse<T> {
    /// Successful response
    pub fn ok(data: T) -> Self {
        Self { data: Some(data), error: None }
    }

    /// Failed response
    pub fn err(message: impl Into<String>) -> Self {
        Self { data: None, error: Some(message.into()) }
    }

    /// Whether the operation succeeded
    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    fn from_result(result: Result<T, RestError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Authentication service for the hosted backend
pub struct AuthService {
    auth: AuthClient,
    rest: RestClient,
}

impl AuthService {
    /// Create an auth service from the backend configuration
    pub fn new(config: BackendConfig) -> Result<Self, RestError> {
        Ok(Self { auth: AuthClient::new(config.clone())?, rest: RestClient::new(config)? })
    }

    /// Register a new user and ensure their profile row exists
    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResponse<Session> {
        match self.auth.sign_up(email, password).await {
            Ok(session) => {
                if let Err(e) = self.ensure_profile(&session).await {
                    tracing::warn!(error = %e, "profile creation failed after sign-up");
                }
                AuthResponse::ok(session)
            }
            Err(e) => AuthResponse::err(e.to_string()),
        }
    }

    /// Sign in with email and password and ensure the profile row exists
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResponse<Session> {
        match self.auth.sign_in(email, password).await {
            Ok(session) => {
                if let Err(e) = self.ensure_profile(&session).await {
                    tracing::warn!(error = %e, "profile creation failed after sign-in");
                }
                AuthResponse::ok(session)
            }
            Err(e) => AuthResponse::err(e.to_string()),
        }
    }

    /// Sign out, invalidating the session's access token
    pub async fn sign_out(&self, access_token: &str) -> AuthResponse<()> {
        AuthResponse::from_result(self.auth.sign_out(access_token).await)
    }

    /// Trigger a password-reset email
    pub async fn reset_password(&self, email: &str) -> AuthResponse<()> {
        AuthResponse::from_result(self.auth.reset_password(email).await)
    }

    /// Update the signed-in user's record
    pub async fn update_profile(
        &self,
        access_token: &str,
        patch: UserPatch,
    ) -> AuthResponse<backend_client::AuthUser> {
        AuthResponse::from_result(self.auth.update_user(access_token, &patch).await)
    }

    /// Create the user's profile row if it does not exist yet
    pub async fn ensure_profile(&self, session: &Session) -> Result<UserProfile, RestError> {
        let existing: Vec<UserProfile> = self
            .rest
            .select("user_profiles", Filters::new().eq("id", &session.user.id))
            .await?;

        if let Some(profile) = existing.into_iter().next() {
            return Ok(profile);
        }

        tracing::debug!(user_id = %session.user.id, "creating missing user profile");
        self.rest
            .insert_one(
                "user_profiles",
                &NewUserProfile {
                    id: session.user.id.clone(),
                    email: session.user.email.clone(),
                    display_name: session
                        .user
                        .user_metadata
                        .get("display_name")
                        .and_then(|v| v.as_str())
                        .map(String::from),
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_json() -> serde_json::Value {
        serde_json::json!({
            "access_token": "at",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "rt",
            "user": {"id": "user-1", "email": "a@b.c"}
        })
    }

    fn profile_json() -> serde_json::Value {
        serde_json::json!({
            "id": "user-1",
            "email": "a@b.c",
            "display_name": null,
            "avatar_url": null,
            "created_at": "2026-01-01T00:00:00Z"
        })
    }

    async fn service_for(server: &MockServer) -> AuthService {
        AuthService::new(BackendConfig::new(server.uri(), "anon")).unwrap()
    }

    #[test]
    fn test_auth_response_shape() {
        let ok: AuthResponse<i32> = AuthResponse::ok(1);
        assert!(ok.is_ok());
        assert_eq!(ok.data, Some(1));
        assert!(ok.error.is_none());

        let err: AuthResponse<i32> = AuthResponse::err("nope");
        assert!(!err.is_ok());
        assert_eq!(err.error.as_deref(), Some("nope"));
    }

    #[tokio::test]
    async fn test_sign_in_creates_missing_profile() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
            .mount(&server)
            .await;

        // Profile lookup comes back empty, then the insert runs
        Mock::given(method("GET"))
            .and(path("/rest/v1/user_profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/user_profiles"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!([profile_json()])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server).await;
        let response = service.sign_in("a@b.c", "secret").await;

        assert!(response.is_ok());
        assert_eq!(response.data.unwrap().user.id, "user-1");
    }

    #[tokio::test]
    async fn test_sign_in_failure_is_error_shape_not_panic() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let service = service_for(&server).await;
        let response = service.sign_in("a@b.c", "wrong").await;

        assert!(!response.is_ok());
        assert!(response.error.unwrap().contains("invalid_grant"));
    }

    #[tokio::test]
    async fn test_ensure_profile_skips_existing_row() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/user_profiles"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([profile_json()])),
            )
            .mount(&server)
            .await;
        // No POST mock mounted: an insert attempt would fail the test

        let service = service_for(&server).await;
        let session: Session = serde_json::from_value(session_json()).unwrap();
        let profile = service.ensure_profile(&session).await.unwrap();

        assert_eq!(profile.id, "user-1");
    }
}
