//! Integration tests for the backend REST and auth clients
//!
//! These use wiremock to stand in for the hosted backend and exercise
//! the full request/response cycle and error mapping.

use backend_client::{AuthClient, BackendConfig, Filters, RestClient, SortDirection};
use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Row {
    id: String,
    name: String,
}

fn config_for(server: &MockServer) -> BackendConfig {
    BackendConfig::new(server.uri(), "anon-key").with_service_key("service-key")
}

// =============================================================================
// REST client
// =============================================================================

#[tokio::test]
async fn test_insert_returns_created_rows() {
    let server = MockServer::start().await;

    let created = vec![Row { id: "ds-1".to_string(), name: "Nightfall".to_string() }];

    Mock::given(method("POST"))
        .and(path("/rest/v1/design_systems"))
        .and(header("apikey", "service-key"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .mount(&server)
        .await;

    let client = RestClient::new(config_for(&server)).unwrap();
    let rows: Vec<Row> = client
        .insert("design_systems", &[serde_json::json!({"name": "Nightfall"})])
        .await
        .unwrap();

    assert_eq!(rows, created);
}

#[tokio::test]
async fn test_select_builds_structured_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/design_systems"))
        .and(query_param("select", "*"))
        .and(query_param("is_public", "eq.true"))
        .and(query_param("order", "updated_at.desc"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![Row {
            id: "ds-1".to_string(),
            name: "Nightfall".to_string(),
        }]))
        .mount(&server)
        .await;

    let client = RestClient::new(config_for(&server)).unwrap();
    let filters = Filters::new()
        .eq("is_public", "true")
        .order("updated_at", SortDirection::Desc)
        .limit(10);

    let rows: Vec<Row> = client.select("design_systems", filters).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Nightfall");
}

#[tokio::test]
async fn test_select_with_count_parses_content_range() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/design_systems"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-range", "0-1/42")
                .set_body_json(vec![
                    Row { id: "a".to_string(), name: "A".to_string() },
                    Row { id: "b".to_string(), name: "B".to_string() },
                ]),
        )
        .mount(&server)
        .await;

    let client = RestClient::new(config_for(&server)).unwrap();
    let (rows, total): (Vec<Row>, u64) = client
        .select_with_count("design_systems", Filters::new())
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(total, 42);
}

#[tokio::test]
async fn test_update_patches_matching_rows() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/design_systems"))
        .and(query_param("id", "eq.ds-1"))
        .and(body_json(serde_json::json!({"is_public": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![Row {
            id: "ds-1".to_string(),
            name: "Nightfall".to_string(),
        }]))
        .mount(&server)
        .await;

    let client = RestClient::new(config_for(&server)).unwrap();
    let rows: Vec<Row> = client
        .update(
            "design_systems",
            Filters::new().eq("id", "ds-1"),
            &serde_json::json!({"is_public": true}),
        )
        .await
        .unwrap();

    assert_eq!(rows[0].id, "ds-1");
}

#[tokio::test]
async fn test_delete_sends_filters() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/favorites"))
        .and(query_param("user_id", "eq.user-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = RestClient::new(config_for(&server)).unwrap();
    client
        .delete("favorites", Filters::new().eq("user_id", "user-1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_2xx_maps_to_error_with_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/design_systems"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"code": "22P02", "message": "bad input"})),
        )
        .mount(&server)
        .await;

    let client = RestClient::new(config_for(&server)).unwrap();
    let result: Result<Vec<Row>, _> = client.select("design_systems", Filters::new()).await;

    let error = result.unwrap_err();
    assert_eq!(error.status(), 400);
    assert_eq!(error.code(), "22P02");
    assert_eq!(error.message(), "bad input");
}

#[tokio::test]
async fn test_network_failure_maps_to_status_zero() {
    // Point at a server that is not running
    let config = BackendConfig::new("http://127.0.0.1:1", "anon-key");
    let client = RestClient::new(config).unwrap();

    let result: Result<Vec<Row>, _> = client.select("design_systems", Filters::new()).await;
    let error = result.unwrap_err();
    assert_eq!(error.status(), 0);
    assert_eq!(error.code(), "NetworkError");
}

// =============================================================================
// Auth client
// =============================================================================

#[tokio::test]
async fn test_sign_in_password_grant() {
    let server = MockServer::start().await;

    let session = serde_json::json!({
        "access_token": "at",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "rt",
        "user": {"id": "user-1", "email": "a@b.c"}
    });

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&session))
        .mount(&server)
        .await;

    let client = AuthClient::new(config_for(&server)).unwrap();
    let session = client.sign_in("a@b.c", "secret").await.unwrap();

    assert_eq!(session.user.id, "user-1");
    assert_eq!(session.access_token, "at");
}

#[tokio::test]
async fn test_sign_in_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"error": "invalid_grant"})),
        )
        .mount(&server)
        .await;

    let client = AuthClient::new(config_for(&server)).unwrap();
    let error = client.sign_in("a@b.c", "wrong").await.unwrap_err();

    assert_eq!(error.status(), 400);
    assert!(error.message().contains("invalid_grant"));
}

#[tokio::test]
async fn test_sign_out_uses_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("Authorization", "Bearer at"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = AuthClient::new(config_for(&server)).unwrap();
    client.sign_out("at").await.unwrap();
}

#[tokio::test]
async fn test_reset_password() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/recover"))
        .and(body_json(serde_json::json!({"email": "a@b.c"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = AuthClient::new(config_for(&server)).unwrap();
    client.reset_password("a@b.c").await.unwrap();
}
