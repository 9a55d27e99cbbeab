//! Route handlers for the design-system HTTP surface
//!
//! Each handler validates what it can check locally (required user id,
//! rating bounds), delegates to the service, and maps errors through
//! [`ApiError`]. No retries, no idempotency keys: a failed delegated
//! call surfaces as an opaque 500.

use app_core::{DesignSystemData, ListQuery, SortKey};
use app_state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiError, ApiResult};

// ====== Request shapes ======

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    page: Option<u64>,
    limit: Option<u64>,
    category: Option<String>,
    /// Comma-separated tag list
    tags: Option<String>,
    /// Free-text search
    q: Option<String>,
    sort: Option<String>,
    user_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserParam {
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBody {
    user_id: Option<String>,
    design_system_data: Option<DesignSystemData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBody {
    user_id: Option<String>,
    design_system_data: Option<DesignSystemData>,
    changelog: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FavoriteBody {
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RateBody {
    user_id: Option<String>,
    /// Kept loose so non-integer input fails validation, not parsing
    rating: Option<serde_json::Value>,
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TogglePublicBody {
    user_id: Option<String>,
    is_public: Option<bool>,
}

/// An empty user id counts as absent
fn optional_user_id(user_id: Option<String>) -> Option<String> {
    user_id.filter(|id| !id.is_empty())
}

fn require_user_id(user_id: Option<String>) -> ApiResult<String> {
    optional_user_id(user_id).ok_or(ApiError::MissingUserId)
}

// ====== Handlers ======

/// `GET /api/design-systems`
///
/// With `userId`: the caller's own systems as `{systems, total}`.
/// Without: the paginated public listing.
pub(crate) async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Response> {
    if let Some(user_id) = optional_user_id(params.user_id) {
        let listing = state.service.list_for_user(&user_id).await?;
        return Ok(Json(listing).into_response());
    }

    let query = ListQuery {
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(20),
        category: params.category,
        tags: params
            .tags
            .map(|t| t.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect())
            .unwrap_or_default(),
        search: params.q,
        sort: params.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
    };

    let listing = state.service.list_public(&query).await?;
    Ok(Json(listing).into_response())
}

/// `POST /api/design-systems`
pub(crate) async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> ApiResult<impl IntoResponse> {
    let user_id = require_user_id(body.user_id)?;
    let data = body
        .design_system_data
        .ok_or_else(|| ApiError::Validation("Design system data is required".to_string()))?;

    let id = state.service.create(&user_id, data).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `GET /api/design-systems/{id}`
pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<UserParam>,
) -> ApiResult<impl IntoResponse> {
    let detail = state.service.get(&id, params.user_id.as_deref()).await?;
    Ok(Json(detail))
}

/// `PUT /api/design-systems/{id}`
pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<impl IntoResponse> {
    let user_id = require_user_id(body.user_id)?;
    let data = body
        .design_system_data
        .ok_or_else(|| ApiError::Validation("Design system data is required".to_string()))?;

    state.service.update(&id, &user_id, data, body.changelog).await?;
    Ok(Json(json!({ "success": true })))
}

/// `DELETE /api/design-systems/{id}`
pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<UserParam>,
) -> ApiResult<impl IntoResponse> {
    let user_id = require_user_id(params.user_id)?;
    state.service.delete(&id, &user_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// `POST /api/design-systems/{id}/favorite`
pub(crate) async fn favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<FavoriteBody>,
) -> ApiResult<impl IntoResponse> {
    let user_id = require_user_id(body.user_id)?;
    let is_favorited = state.service.toggle_favorite(&id, &user_id).await?;
    Ok(Json(json!({ "isFavorited": is_favorited })))
}

/// `POST /api/design-systems/{id}/rate`
pub(crate) async fn rate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RateBody>,
) -> ApiResult<impl IntoResponse> {
    let user_id = require_user_id(body.user_id)?;

    let rating = body
        .rating
        .as_ref()
        .and_then(serde_json::Value::as_i64)
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| {
            ApiError::Validation("Rating must be an integer between 1 and 5".to_string())
        })?;

    state.service.rate(&id, &user_id, rating as i32, body.comment).await?;
    Ok(Json(json!({ "success": true })))
}

/// `POST /api/design-systems/{id}/toggle-public`
pub(crate) async fn toggle_public(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TogglePublicBody>,
) -> ApiResult<impl IntoResponse> {
    let user_id = require_user_id(body.user_id)?;
    let is_public = body
        .is_public
        .ok_or_else(|| ApiError::Validation("isPublic is required".to_string()))?;

    state.service.toggle_public(&id, &user_id, is_public).await?;
    Ok(Json(json!({ "success": true })))
}

/// `GET /api/design-systems/{id}/versions`
pub(crate) async fn versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<UserParam>,
) -> ApiResult<impl IntoResponse> {
    let versions = state.service.versions(&id, params.user_id.as_deref()).await?;
    Ok(Json(json!({ "versions": versions })))
}

/// `GET /api/design-systems/shared/{token}`
pub(crate) async fn shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let detail = state.service.get_by_share_token(&token).await?;
    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use crate::router;
    use app_state::AppState;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt as _;

    async fn request(app: axum::Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn test_app() -> axum::Router {
        router(AppState::in_memory().unwrap())
    }

    async fn create_system(app: &axum::Router, user: &str, name: &str) -> String {
        let req = post_json(
            "/api/design-systems",
            json!({ "userId": user, "designSystemData": { "name": name } }),
        );
        let (status, body) = request(app.clone(), req).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_without_user_id_is_400() {
        let req = post_json("/api/design-systems", json!({ "designSystemData": { "name": "x" } }));
        let (status, body) = request(test_app(), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User ID is required");
    }

    #[tokio::test]
    async fn test_empty_user_id_counts_as_absent() {
        let app = test_app();
        create_system(&app, "alice", "Nord").await;

        // Mutating route: same 400 as a missing id
        let req = post_json(
            "/api/design-systems",
            json!({ "userId": "", "designSystemData": { "name": "x" } }),
        );
        let (status, body) = request(app.clone(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User ID is required");

        // Listing: falls through to the public shape, not an owner listing
        let req = Request::get("/api/design-systems?userId=")
            .body(Body::empty())
            .unwrap();
        let (status, body) = request(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 1);
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_create_without_data_is_400() {
        let req = post_json("/api/design-systems", json!({ "userId": "alice" }));
        let (status, body) = request(test_app(), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Design system data is required");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let req = Request::get("/api/design-systems/nope").body(Body::empty()).unwrap();
        let (status, body) = request(test_app(), req).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Design system not found");
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let app = test_app();
        let id = create_system(&app, "alice", "Nord").await;

        let req = Request::get(format!("/api/design-systems/{id}?userId=alice"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = request(app, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Nord");
        assert_eq!(body["userId"], "alice");
    }

    #[tokio::test]
    async fn test_rate_bounds() {
        let app = test_app();
        let id = create_system(&app, "alice", "Nord").await;
        let uri = format!("/api/design-systems/{id}/rate");

        for bad in [json!(0), json!(6), json!(4.5), Value::Null] {
            let req = post_json(&uri, json!({ "userId": "bob", "rating": bad }));
            let (status, body) = request(app.clone(), req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Rating must be an integer between 1 and 5");
        }

        let req = post_json(&uri, json!({ "userId": "bob", "rating": 5 }));
        let (status, body) = request(app.clone(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_favorite_toggles() {
        let app = test_app();
        let id = create_system(&app, "alice", "Nord").await;
        let uri = format!("/api/design-systems/{id}/favorite");

        let (_, body) = request(app.clone(), post_json(&uri, json!({ "userId": "bob" }))).await;
        assert_eq!(body["isFavorited"], true);

        let (_, body) = request(app.clone(), post_json(&uri, json!({ "userId": "bob" }))).await;
        assert_eq!(body["isFavorited"], false);
    }

    #[tokio::test]
    async fn test_delete_requires_user_id() {
        let app = test_app();
        let id = create_system(&app, "alice", "Nord").await;

        let req = Request::delete(format!("/api/design-systems/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = request(app.clone(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User ID is required");

        let req = Request::delete(format!("/api/design-systems/{id}?userId=alice"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = request(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_list_shapes() {
        let app = test_app();
        create_system(&app, "alice", "Nord").await;
        create_system(&app, "alice", "Solar").await;

        // Owner listing: {systems, total}
        let req = Request::get("/api/design-systems?userId=alice").body(Body::empty()).unwrap();
        let (status, body) = request(app.clone(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert!(body.get("page").is_none());

        // Public listing: paginated, private systems excluded
        let req = Request::get("/api/design-systems").body(Body::empty()).unwrap();
        let (status, body) = request(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert_eq!(body["page"], 1);
    }

    #[tokio::test]
    async fn test_toggle_public_and_shared_lookup() {
        let app = test_app();
        let id = create_system(&app, "alice", "Nord").await;

        let req = post_json(
            &format!("/api/design-systems/{id}/toggle-public"),
            json!({ "userId": "alice", "isPublic": true }),
        );
        let (status, _) = request(app.clone(), req).await;
        assert_eq!(status, StatusCode::OK);

        let req = Request::get(format!("/api/design-systems/{id}?userId=alice"))
            .body(Body::empty())
            .unwrap();
        let (_, body) = request(app.clone(), req).await;
        let token = body["shareToken"].as_str().unwrap().to_string();

        let req = Request::get(format!("/api/design-systems/shared/{token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = request(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Nord");
    }

    #[tokio::test]
    async fn test_update_appends_version() {
        let app = test_app();
        let id = create_system(&app, "alice", "Nord").await;

        let req = Request::builder()
            .method("PUT")
            .uri(format!("/api/design-systems/{id}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "userId": "alice",
                    "designSystemData": { "name": "Nord v2" },
                    "changelog": "rename"
                })
                .to_string(),
            ))
            .unwrap();
        let (status, body) = request(app.clone(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let req = Request::get(format!("/api/design-systems/{id}/versions?userId=alice"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = request(app, req).await;
        assert_eq!(status, StatusCode::OK);

        let versions = body["versions"].as_array().unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0]["versionNumber"], 2);
        assert_eq!(versions[0]["changelog"], "rename");
    }
}
