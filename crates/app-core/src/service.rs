//! Design-system service
//!
//! Orchestrates persistence behind a single interface. Exactly one
//! backend is configured at construction: the hosted backend's REST
//! endpoint, or the local fallback store when no backend is configured.
//!
//! Multi-row writes (a design system plus its components, themes and
//! version snapshot) are a sequence of independent calls with no
//! atomicity guarantee; a failure partway surfaces as an error and
//! leaves partial state behind.

use backend_client::entities::{
    Component, DesignSystem, Favorite, NewComponent, NewDesignSystem, NewFavorite, NewRating,
    NewTheme, NewVersion, Rating, Theme, Version,
};
use backend_client::{BackendConfig, Filters, RestClient, RestError, SortDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::{
    LocalStore, LocalStoreError, StoredComponent, StoredDesignSystem, StoredRating, StoredTheme,
    StoredVersion,
};
use uuid::Uuid;

/// Service error types
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Hosted backend error
    #[error("Backend error: {0}")]
    Backend(#[from] RestError),

    /// Local fallback store error
    #[error("Local store error: {0}")]
    Local(#[from] LocalStoreError),

    /// Snapshot serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Design system missing or not visible to the requesting user
    #[error("Design system not found")]
    NotFound,

    /// Rating outside the accepted range
    #[error("Rating must be an integer between 1 and 5")]
    InvalidRating,
}

/// Result type for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

// =============================================================================
// Data Transfer Types
// =============================================================================

/// A component as submitted or returned through the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentData {
    /// Component name
    pub name: String,
    /// Component type (e.g., "button", "card")
    pub component_type: String,
    /// Property bag
    #[serde(default)]
    pub props: serde_json::Value,
    /// Style bag
    #[serde(default)]
    pub styles: serde_json::Value,
    /// Order within the design system
    #[serde(default)]
    pub sort_order: i32,
}

/// A theme as submitted or returned through the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeData {
    /// Theme name
    pub name: String,
    /// Color bag
    #[serde(default)]
    pub colors: serde_json::Value,
    /// Typography bag
    #[serde(default)]
    pub typography: serde_json::Value,
    /// Spacing bag
    #[serde(default)]
    pub spacing: serde_json::Value,
    /// Whether this theme is the default
    #[serde(default)]
    pub is_default: bool,
}

/// Payload for creating or updating a design system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystemData {
    /// Display name
    pub name: String,
    /// Description text
    #[serde(default)]
    pub description: Option<String>,
    /// Category label
    #[serde(default)]
    pub category: Option<String>,
    /// Ordered tag list
    #[serde(default)]
    pub tags: Vec<String>,
    /// Public visibility flag
    #[serde(default)]
    pub is_public: bool,
    /// Components
    #[serde(default)]
    pub components: Vec<ComponentData>,
    /// Themes
    #[serde(default)]
    pub themes: Vec<ThemeData>,
}

/// Summary of a design system (no nested components/themes)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystemSummary {
    /// Identifier
    pub id: String,
    /// Owning user identifier
    pub user_id: Option<String>,
    /// Display name
    pub name: String,
    /// Description text
    pub description: Option<String>,
    /// Category label
    pub category: Option<String>,
    /// Ordered tag list
    pub tags: Vec<String>,
    /// Public visibility flag
    pub is_public: bool,
    /// Opaque read-access token
    pub share_token: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Favorite count
    pub favorite_count: i64,
    /// Rating aggregate (mean)
    pub rating: f64,
}

/// A design system with nested components and themes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystemDetail {
    /// Summary fields
    #[serde(flatten)]
    pub summary: DesignSystemSummary,
    /// Nested components, in sort order
    pub components: Vec<ComponentData>,
    /// Nested themes
    pub themes: Vec<ThemeData>,
}

/// A version history entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    /// Monotonically increasing version number
    pub version_number: i32,
    /// Full data snapshot at this version
    pub data: serde_json::Value,
    /// Optional changelog text
    pub changelog: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Sort key for public listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recently updated first (default)
    #[default]
    Recent,
    /// Most favorited first
    Popular,
    /// Highest rated first
    Rating,
}

impl SortKey {
    /// Parse a sort key from its query-string form, defaulting to recent
    pub fn parse(value: &str) -> Self {
        match value {
            "popular" => SortKey::Popular,
            "rating" => SortKey::Rating,
            _ => SortKey::Recent,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            SortKey::Recent => "updated_at",
            SortKey::Popular => "favorite_count",
            SortKey::Rating => "rating",
        }
    }
}

/// Query parameters for the public listing
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Filter by category
    pub category: Option<String>,
    /// Filter by tags (all must match)
    pub tags: Vec<String>,
    /// Free-text search over name and description
    pub search: Option<String>,
    /// Sort key
    pub sort: SortKey,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            category: None,
            tags: Vec::new(),
            search: None,
            sort: SortKey::Recent,
        }
    }
}

impl ListQuery {
    fn normalized(&self) -> (u64, u64) {
        let page = self.page.max(1);
        let limit = self.limit.clamp(1, 100);
        (page, limit)
    }
}

/// Paginated public listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicListing {
    /// Matching design systems for the requested page
    pub systems: Vec<DesignSystemSummary>,
    /// Total number of matches
    pub total: u64,
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Total number of pages
    pub total_pages: u64,
}

/// Listing of a user's own design systems
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserListing {
    /// The user's design systems, newest update first
    pub systems: Vec<DesignSystemSummary>,
    /// Total count
    pub total: u64,
}

// =============================================================================
// Default-theme normalization
// =============================================================================

/// At most one theme per design system carries the default flag. The
/// first flagged theme wins; if none is flagged the first theme becomes
/// the default.
fn normalize_default_themes(themes: &mut [ThemeData]) {
    let mut seen_default = false;
    for theme in themes.iter_mut() {
        if theme.is_default {
            if seen_default {
                theme.is_default = false;
            } else {
                seen_default = true;
            }
        }
    }
    if !seen_default {
        if let Some(first) = themes.first_mut() {
            first.is_default = true;
        }
    }
}

// =============================================================================
// Service
// =============================================================================

enum Backend {
    Remote(RestClient),
    Local(LocalStore),
}

/// Design-system service backed by exactly one persistence backend
pub struct DesignSystemService {
    backend: Backend,
}

impl DesignSystemService {
    /// Create a service against the hosted backend
    pub fn remote(config: BackendConfig) -> Result<Self> {
        Ok(Self { backend: Backend::Remote(RestClient::new(config)?) })
    }

    /// Create a service against the local fallback store
    pub fn local(store: LocalStore) -> Self {
        Self { backend: Backend::Local(store) }
    }

    /// Whether the service talks to the hosted backend
    pub fn is_remote(&self) -> bool {
        matches!(self.backend, Backend::Remote(_))
    }

    /// List public design systems with pagination, filtering and sorting
    pub async fn list_public(&self, query: &ListQuery) -> Result<PublicListing> {
        let (page, limit) = query.normalized();

        match &self.backend {
            Backend::Remote(rest) => {
                let mut filters = Filters::new()
                    .eq("is_public", "true")
                    .order(query.sort.column(), SortDirection::Desc)
                    .limit(limit)
                    .offset((page - 1) * limit);

                if let Some(category) = &query.category {
                    filters = filters.eq("category", category.clone());
                }
                if !query.tags.is_empty() {
                    filters = filters.contains("tags", &query.tags);
                }
                if let Some(search) = &query.search {
                    filters = filters.or_ilike(&["name", "description"], search);
                }

                let (rows, total): (Vec<DesignSystem>, u64) =
                    rest.select_with_count("design_systems", filters).await?;

                Ok(PublicListing {
                    systems: rows.into_iter().map(summary_from_row).collect(),
                    total,
                    page,
                    limit,
                    total_pages: total.div_ceil(limit),
                })
            }
            Backend::Local(store) => {
                let mut systems = store.list_public()?;

                if let Some(category) = &query.category {
                    systems.retain(|s| s.category.as_deref() == Some(category.as_str()));
                }
                if !query.tags.is_empty() {
                    systems.retain(|s| query.tags.iter().all(|t| s.tags.contains(t)));
                }
                if let Some(search) = &query.search {
                    let needle = search.to_lowercase();
                    systems.retain(|s| {
                        s.name.to_lowercase().contains(&needle)
                            || s.description
                                .as_deref()
                                .is_some_and(|d| d.to_lowercase().contains(&needle))
                    });
                }

                match query.sort {
                    SortKey::Recent => systems.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
                    SortKey::Popular => {
                        systems.sort_by(|a, b| b.favorite_count.cmp(&a.favorite_count))
                    }
                    SortKey::Rating => systems.sort_by(|a, b| {
                        b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal)
                    }),
                }

                let total = systems.len() as u64;
                let page_systems: Vec<DesignSystemSummary> = systems
                    .into_iter()
                    .skip(((page - 1) * limit) as usize)
                    .take(limit as usize)
                    .map(summary_from_stored)
                    .collect();

                Ok(PublicListing {
                    systems: page_systems,
                    total,
                    page,
                    limit,
                    total_pages: total.div_ceil(limit),
                })
            }
        }
    }

    /// List a user's own design systems, newest update first
    pub async fn list_for_user(&self, user_id: &str) -> Result<UserListing> {
        match &self.backend {
            Backend::Remote(rest) => {
                let filters = Filters::new()
                    .eq("user_id", user_id)
                    .order("updated_at", SortDirection::Desc);
                let (rows, total): (Vec<DesignSystem>, u64) =
                    rest.select_with_count("design_systems", filters).await?;

                Ok(UserListing {
                    systems: rows.into_iter().map(summary_from_row).collect(),
                    total,
                })
            }
            Backend::Local(store) => {
                let systems = store.list_for_user(user_id)?;
                let total = systems.len() as u64;
                Ok(UserListing {
                    systems: systems.into_iter().map(summary_from_stored).collect(),
                    total,
                })
            }
        }
    }

    /// Fetch one design system with nested components and themes
    ///
    /// Visible when public, or when `requesting_user` matches the owner.
    /// Anything else reports not-found rather than leaking existence.
    pub async fn get(
        &self,
        id: &str,
        requesting_user: Option<&str>,
    ) -> Result<DesignSystemDetail> {
        match &self.backend {
            Backend::Remote(rest) => {
                let rows: Vec<DesignSystem> =
                    rest.select("design_systems", Filters::new().eq("id", id)).await?;
                let row = rows.into_iter().next().ok_or(ServiceError::NotFound)?;

                if !visible_to(row.is_public, row.user_id.as_deref(), requesting_user) {
                    return Err(ServiceError::NotFound);
                }

                let components: Vec<Component> = rest
                    .select(
                        "components",
                        Filters::new()
                            .eq("design_system_id", id)
                            .order("sort_order", SortDirection::Asc),
                    )
                    .await?;
                let themes: Vec<Theme> = rest
                    .select("themes", Filters::new().eq("design_system_id", id))
                    .await?;

                Ok(DesignSystemDetail {
                    summary: summary_from_row(row),
                    components: components.into_iter().map(component_data_from_row).collect(),
                    themes: themes.into_iter().map(theme_data_from_row).collect(),
                })
            }
            Backend::Local(store) => {
                let stored = store.get(id)?.ok_or(ServiceError::NotFound)?;
                if !visible_to(stored.is_public, stored.user_id.as_deref(), requesting_user) {
                    return Err(ServiceError::NotFound);
                }
                Ok(detail_from_stored(stored))
            }
        }
    }

    /// Fetch one design system by its share token
    pub async fn get_by_share_token(&self, token: &str) -> Result<DesignSystemDetail> {
        match &self.backend {
            Backend::Remote(rest) => {
                let rows: Vec<DesignSystem> = rest
                    .select("design_systems", Filters::new().eq("share_token", token))
                    .await?;
                let row = rows.into_iter().next().ok_or(ServiceError::NotFound)?;
                let id = row.id.clone();

                let components: Vec<Component> = rest
                    .select(
                        "components",
                        Filters::new()
                            .eq("design_system_id", &id)
                            .order("sort_order", SortDirection::Asc),
                    )
                    .await?;
                let themes: Vec<Theme> = rest
                    .select("themes", Filters::new().eq("design_system_id", &id))
                    .await?;

                Ok(DesignSystemDetail {
                    summary: summary_from_row(row),
                    components: components.into_iter().map(component_data_from_row).collect(),
                    themes: themes.into_iter().map(theme_data_from_row).collect(),
                })
            }
            Backend::Local(store) => {
                let stored = store.get_by_share_token(token)?.ok_or(ServiceError::NotFound)?;
                Ok(detail_from_stored(stored))
            }
        }
    }

    /// Create a design system with its components, themes and a first
    /// version snapshot, returning the new identifier
    pub async fn create(&self, user_id: &str, mut data: DesignSystemData) -> Result<String> {
        normalize_default_themes(&mut data.themes);
        let share_token = Uuid::new_v4().to_string();
        let snapshot = serde_json::to_value(&data)?;

        match &self.backend {
            Backend::Remote(rest) => {
                let row: DesignSystem = rest
                    .insert_one(
                        "design_systems",
                        &NewDesignSystem {
                            user_id: Some(user_id.to_string()),
                            name: data.name.clone(),
                            description: data.description.clone(),
                            category: data.category.clone(),
                            tags: data.tags.clone(),
                            is_public: data.is_public,
                            share_token,
                        },
                    )
                    .await?;

                if !data.components.is_empty() {
                    let rows: Vec<NewComponent> = data
                        .components
                        .iter()
                        .map(|c| new_component_row(&row.id, c))
                        .collect();
                    let _: Vec<Component> = rest.insert("components", &rows).await?;
                }
                if !data.themes.is_empty() {
                    let rows: Vec<NewTheme> =
                        data.themes.iter().map(|t| new_theme_row(&row.id, t)).collect();
                    let _: Vec<Theme> = rest.insert("themes", &rows).await?;
                }

                let _: Version = rest
                    .insert_one(
                        "versions",
                        &NewVersion {
                            design_system_id: row.id.clone(),
                            version_number: 1,
                            data: snapshot,
                            changelog: None,
                        },
                    )
                    .await?;

                tracing::info!(id = %row.id, "created design system");
                Ok(row.id)
            }
            Backend::Local(store) => {
                let now = Utc::now();
                let stored = StoredDesignSystem {
                    id: String::new(),
                    user_id: Some(user_id.to_string()),
                    name: data.name.clone(),
                    description: data.description.clone(),
                    category: data.category.clone(),
                    tags: data.tags.clone(),
                    is_public: data.is_public,
                    share_token,
                    created_at: now,
                    updated_at: now,
                    favorite_count: 0,
                    rating: 0.0,
                    components: data.components.iter().map(stored_component_from_data).collect(),
                    themes: data.themes.iter().map(stored_theme_from_data).collect(),
                    versions: vec![StoredVersion {
                        version_number: 1,
                        data: snapshot,
                        changelog: None,
                        created_at: now,
                    }],
                    favorited_by: Vec::new(),
                    ratings: Vec::new(),
                };
                Ok(store.save(stored)?)
            }
        }
    }

    /// Update a design system, replacing its components and themes and
    /// appending a version snapshot with an optional changelog
    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        mut data: DesignSystemData,
        changelog: Option<String>,
    ) -> Result<()> {
        normalize_default_themes(&mut data.themes);
        let snapshot = serde_json::to_value(&data)?;

        match &self.backend {
            Backend::Remote(rest) => {
                let owned: Vec<DesignSystem> = rest
                    .select(
                        "design_systems",
                        Filters::new().eq("id", id).eq("user_id", user_id),
                    )
                    .await?;
                if owned.is_empty() {
                    return Err(ServiceError::NotFound);
                }

                let patch = serde_json::json!({
                    "name": data.name,
                    "description": data.description,
                    "category": data.category,
                    "tags": data.tags,
                    "is_public": data.is_public,
                    "updated_at": Utc::now(),
                });
                let _: Vec<DesignSystem> = rest
                    .update("design_systems", Filters::new().eq("id", id), &patch)
                    .await?;

                // Replace nested rows wholesale
                rest.delete("components", Filters::new().eq("design_system_id", id)).await?;
                if !data.components.is_empty() {
                    let rows: Vec<NewComponent> =
                        data.components.iter().map(|c| new_component_row(id, c)).collect();
                    let _: Vec<Component> = rest.insert("components", &rows).await?;
                }
                rest.delete("themes", Filters::new().eq("design_system_id", id)).await?;
                if !data.themes.is_empty() {
                    let rows: Vec<NewTheme> =
                        data.themes.iter().map(|t| new_theme_row(id, t)).collect();
                    let _: Vec<Theme> = rest.insert("themes", &rows).await?;
                }

                let next = self.next_version_number(rest, id).await?;
                let _: Version = rest
                    .insert_one(
                        "versions",
                        &NewVersion {
                            design_system_id: id.to_string(),
                            version_number: next,
                            data: snapshot,
                            changelog,
                        },
                    )
                    .await?;

                tracing::info!(id, version = next, "updated design system");
                Ok(())
            }
            Backend::Local(store) => {
                self.require_local_owner(store, id, user_id)?;
                store.update(id, |s| {
                    s.name = data.name.clone();
                    s.description = data.description.clone();
                    s.category = data.category.clone();
                    s.tags = data.tags.clone();
                    s.is_public = data.is_public;
                    s.components =
                        data.components.iter().map(stored_component_from_data).collect();
                    s.themes = data.themes.iter().map(stored_theme_from_data).collect();

                    let next =
                        s.versions.iter().map(|v| v.version_number).max().unwrap_or(0) + 1;
                    s.versions.push(StoredVersion {
                        version_number: next,
                        data: snapshot.clone(),
                        changelog: changelog.clone(),
                        created_at: Utc::now(),
                    });
                })?;
                Ok(())
            }
        }
    }

    /// Delete a design system owned by the user
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        match &self.backend {
            Backend::Remote(rest) => {
                let owned: Vec<DesignSystem> = rest
                    .select(
                        "design_systems",
                        Filters::new().eq("id", id).eq("user_id", user_id),
                    )
                    .await?;
                if owned.is_empty() {
                    return Err(ServiceError::NotFound);
                }

                // Child rows cascade on the backend
                rest.delete("design_systems", Filters::new().eq("id", id)).await?;
                tracing::info!(id, "deleted design system");
                Ok(())
            }
            Backend::Local(store) => {
                self.require_local_owner(store, id, user_id)?;
                store.delete(id)?;
                Ok(())
            }
        }
    }

    /// Toggle a user's favorite on a design system, returning the new state
    pub async fn toggle_favorite(&self, id: &str, user_id: &str) -> Result<bool> {
        match &self.backend {
            Backend::Remote(rest) => {
                let rows: Vec<DesignSystem> =
                    rest.select("design_systems", Filters::new().eq("id", id)).await?;
                let system = rows.into_iter().next().ok_or(ServiceError::NotFound)?;

                let existing: Vec<Favorite> = rest
                    .select(
                        "favorites",
                        Filters::new().eq("design_system_id", id).eq("user_id", user_id),
                    )
                    .await?;

                let is_favorited = if existing.is_empty() {
                    let _: Favorite = rest
                        .insert_one(
                            "favorites",
                            &NewFavorite {
                                design_system_id: id.to_string(),
                                user_id: user_id.to_string(),
                            },
                        )
                        .await?;
                    true
                } else {
                    rest.delete(
                        "favorites",
                        Filters::new().eq("design_system_id", id).eq("user_id", user_id),
                    )
                    .await?;
                    false
                };

                let count = if is_favorited {
                    system.favorite_count + 1
                } else {
                    (system.favorite_count - 1).max(0)
                };
                let _: Vec<DesignSystem> = rest
                    .update(
                        "design_systems",
                        Filters::new().eq("id", id),
                        &serde_json::json!({ "favorite_count": count }),
                    )
                    .await?;

                Ok(is_favorited)
            }
            Backend::Local(store) => {
                if store.get(id)?.is_none() {
                    return Err(ServiceError::NotFound);
                }
                let updated = store.update(id, |s| {
                    if let Some(pos) = s.favorited_by.iter().position(|u| u == user_id) {
                        s.favorited_by.remove(pos);
                    } else {
                        s.favorited_by.push(user_id.to_string());
                    }
                    s.favorite_count = s.favorited_by.len() as i64;
                })?;
                Ok(updated.favorited_by.iter().any(|u| u == user_id))
            }
        }
    }

    /// Submit or replace a user's rating and recompute the aggregate
    pub async fn rate(
        &self,
        id: &str,
        user_id: &str,
        rating: i32,
        comment: Option<String>,
    ) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(ServiceError::InvalidRating);
        }

        match &self.backend {
            Backend::Remote(rest) => {
                let rows: Vec<DesignSystem> =
                    rest.select("design_systems", Filters::new().eq("id", id)).await?;
                if rows.is_empty() {
                    return Err(ServiceError::NotFound);
                }

                let existing: Vec<Rating> = rest
                    .select(
                        "ratings",
                        Filters::new().eq("design_system_id", id).eq("user_id", user_id),
                    )
                    .await?;

                if existing.is_empty() {
                    let _: Rating = rest
                        .insert_one(
                            "ratings",
                            &NewRating {
                                design_system_id: id.to_string(),
                                user_id: user_id.to_string(),
                                rating,
                                comment: comment.clone(),
                            },
                        )
                        .await?;
                } else {
                    let _: Vec<Rating> = rest
                        .update(
                            "ratings",
                            Filters::new().eq("design_system_id", id).eq("user_id", user_id),
                            &serde_json::json!({ "rating": rating, "comment": comment }),
                        )
                        .await?;
                }

                let all: Vec<Rating> = rest
                    .select("ratings", Filters::new().eq("design_system_id", id))
                    .await?;
                let count = all.len() as i64;
                let mean = if count == 0 {
                    0.0
                } else {
                    all.iter().map(|r| r.rating as f64).sum::<f64>() / count as f64
                };

                let _: Vec<DesignSystem> = rest
                    .update(
                        "design_systems",
                        Filters::new().eq("id", id),
                        &serde_json::json!({ "rating": mean, "rating_count": count }),
                    )
                    .await?;
                Ok(())
            }
            Backend::Local(store) => {
                if store.get(id)?.is_none() {
                    return Err(ServiceError::NotFound);
                }
                store.update(id, |s| {
                    s.ratings.retain(|r| r.user_id != user_id);
                    s.ratings.push(StoredRating {
                        user_id: user_id.to_string(),
                        rating,
                        comment: comment.clone(),
                        created_at: Utc::now(),
                    });
                    s.rating = s.ratings.iter().map(|r| r.rating as f64).sum::<f64>()
                        / s.ratings.len() as f64;
                })?;
                Ok(())
            }
        }
    }

    /// Set the public visibility of a design system owned by the user
    pub async fn toggle_public(&self, id: &str, user_id: &str, is_public: bool) -> Result<()> {
        match &self.backend {
            Backend::Remote(rest) => {
                let updated: Vec<DesignSystem> = rest
                    .update(
                        "design_systems",
                        Filters::new().eq("id", id).eq("user_id", user_id),
                        &serde_json::json!({ "is_public": is_public }),
                    )
                    .await?;
                if updated.is_empty() {
                    return Err(ServiceError::NotFound);
                }
                Ok(())
            }
            Backend::Local(store) => {
                self.require_local_owner(store, id, user_id)?;
                store.update(id, |s| {
                    s.is_public = is_public;
                })?;
                Ok(())
            }
        }
    }

    /// Fetch the version history of a design system, newest first
    pub async fn versions(
        &self,
        id: &str,
        requesting_user: Option<&str>,
    ) -> Result<Vec<VersionEntry>> {
        match &self.backend {
            Backend::Remote(rest) => {
                let rows: Vec<DesignSystem> =
                    rest.select("design_systems", Filters::new().eq("id", id)).await?;
                let system = rows.into_iter().next().ok_or(ServiceError::NotFound)?;
                if !visible_to(system.is_public, system.user_id.as_deref(), requesting_user) {
                    return Err(ServiceError::NotFound);
                }

                let versions: Vec<Version> = rest
                    .select(
                        "versions",
                        Filters::new()
                            .eq("design_system_id", id)
                            .order("version_number", SortDirection::Desc),
                    )
                    .await?;

                Ok(versions
                    .into_iter()
                    .map(|v| VersionEntry {
                        version_number: v.version_number,
                        data: v.data,
                        changelog: v.changelog,
                        created_at: v.created_at,
                    })
                    .collect())
            }
            Backend::Local(store) => {
                let stored = store.get(id)?.ok_or(ServiceError::NotFound)?;
                if !visible_to(stored.is_public, stored.user_id.as_deref(), requesting_user) {
                    return Err(ServiceError::NotFound);
                }

                let mut versions: Vec<VersionEntry> = stored
                    .versions
                    .into_iter()
                    .map(|v| VersionEntry {
                        version_number: v.version_number,
                        data: v.data,
                        changelog: v.changelog,
                        created_at: v.created_at,
                    })
                    .collect();
                versions.sort_by(|a, b| b.version_number.cmp(&a.version_number));
                Ok(versions)
            }
        }
    }

    async fn next_version_number(&self, rest: &RestClient, id: &str) -> Result<i32> {
        let latest: Vec<Version> = rest
            .select(
                "versions",
                Filters::new()
                    .eq("design_system_id", id)
                    .order("version_number", SortDirection::Desc)
                    .limit(1),
            )
            .await?;
        Ok(latest.first().map(|v| v.version_number).unwrap_or(0) + 1)
    }

    fn require_local_owner(&self, store: &LocalStore, id: &str, user_id: &str) -> Result<()> {
        let stored = store.get(id)?.ok_or(ServiceError::NotFound)?;
        if stored.user_id.as_deref() != Some(user_id) {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Conversions
// =============================================================================

fn visible_to(is_public: bool, owner: Option<&str>, requesting_user: Option<&str>) -> bool {
    is_public || (owner.is_some() && owner == requesting_user)
}

fn summary_from_row(row: DesignSystem) -> DesignSystemSummary {
    DesignSystemSummary {
        id: row.id,
        user_id: row.user_id,
        name: row.name,
        description: row.description,
        category: row.category,
        tags: row.tags,
        is_public: row.is_public,
        share_token: row.share_token,
        created_at: row.created_at,
        updated_at: row.updated_at,
        favorite_count: row.favorite_count,
        rating: row.rating,
    }
}

fn summary_from_stored(stored: StoredDesignSystem) -> DesignSystemSummary {
    DesignSystemSummary {
        id: stored.id,
        user_id: stored.user_id,
        name: stored.name,
        description: stored.description,
        category: stored.category,
        tags: stored.tags,
        is_public: stored.is_public,
        share_token: stored.share_token,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
        favorite_count: stored.favorite_count,
        rating: stored.rating,
    }
}

fn detail_from_stored(stored: StoredDesignSystem) -> DesignSystemDetail {
    let components = stored
        .components
        .iter()
        .map(|c| ComponentData {
            name: c.name.clone(),
            component_type: c.component_type.clone(),
            props: c.props.clone(),
            styles: c.styles.clone(),
            sort_order: c.sort_order,
        })
        .collect();
    let themes = stored
        .themes
        .iter()
        .map(|t| ThemeData {
            name: t.name.clone(),
            colors: t.colors.clone(),
            typography: t.typography.clone(),
            spacing: t.spacing.clone(),
            is_default: t.is_default,
        })
        .collect();

    DesignSystemDetail { summary: summary_from_stored(stored), components, themes }
}

fn component_data_from_row(row: Component) -> ComponentData {
    ComponentData {
        name: row.name,
        component_type: row.component_type,
        props: row.props,
        styles: row.styles,
        sort_order: row.sort_order,
    }
}

fn theme_data_from_row(row: Theme) -> ThemeData {
    ThemeData {
        name: row.name,
        colors: row.colors,
        typography: row.typography,
        spacing: row.spacing,
        is_default: row.is_default,
    }
}

fn new_component_row(design_system_id: &str, data: &ComponentData) -> NewComponent {
    NewComponent {
        design_system_id: design_system_id.to_string(),
        name: data.name.clone(),
        component_type: data.component_type.clone(),
        props: data.props.clone(),
        styles: data.styles.clone(),
        sort_order: data.sort_order,
    }
}

fn new_theme_row(design_system_id: &str, data: &ThemeData) -> NewTheme {
    NewTheme {
        design_system_id: design_system_id.to_string(),
        name: data.name.clone(),
        colors: data.colors.clone(),
        typography: data.typography.clone(),
        spacing: data.spacing.clone(),
        is_default: data.is_default,
    }
}

fn stored_component_from_data(data: &ComponentData) -> StoredComponent {
    StoredComponent {
        name: data.name.clone(),
        component_type: data.component_type.clone(),
        props: data.props.clone(),
        styles: data.styles.clone(),
        sort_order: data.sort_order,
    }
}

fn stored_theme_from_data(data: &ThemeData) -> StoredTheme {
    StoredTheme {
        name: data.name.clone(),
        colors: data.colors.clone(),
        typography: data.typography.clone(),
        spacing: data.spacing.clone(),
        is_default: data.is_default,
    }
}

// =============================================================================
// Tests
// =============================================================================
