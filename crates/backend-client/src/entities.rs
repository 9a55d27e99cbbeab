//! Row shapes for the backend tables
//!
//! Field names match the snake_case column names exposed by the
//! backend's REST endpoint. `New*` structs are the insert shapes; the
//! backend fills in ids and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A design system row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignSystem {
    /// Row identifier
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
    #[serde(default)]
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
    #[serde(default)]
    pub favorite_count: i64,
    /// Rating aggregate (mean of submitted ratings)
    #[serde(default)]
    pub rating: f64,
    /// Number of submitted ratings
    #[serde(default)]
    pub rating_count: i64,
}

/// Insert shape for a design system
#[derive(Debug, Clone, Serialize)]
pub struct NewDesignSystem {
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
}

/// A component row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Component {
    /// Row identifier
    pub id: String,
    /// Owning design system
    pub design_system_id: String,
    /// Component name
    pub name: String,
    /// Component type (e.g., "button", "card")
    pub component_type: String,
    /// Property bag
    pub props: serde_json::Value,
    /// Style bag
    pub styles: serde_json::Value,
    /// Order within the design system
    #[serde(default)]
    pub sort_order: i32,
}

/// Insert shape for a component
#[derive(Debug, Clone, Serialize)]
pub struct NewComponent {
    /// Owning design system
    pub design_system_id: String,
    /// Component name
    pub name: String,
    /// Component type
    pub component_type: String,
    /// Property bag
    pub props: serde_json::Value,
    /// Style bag
    pub styles: serde_json::Value,
    /// Order within the design system
    pub sort_order: i32,
}

/// A theme row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    /// Row identifier
    pub id: String,
    /// Owning design system
    pub design_system_id: String,
    /// Theme name
    pub name: String,
    /// Color bag
    pub colors: serde_json::Value,
    /// Typography bag
    pub typography: serde_json::Value,
    /// Spacing bag
    pub spacing: serde_json::Value,
    /// Whether this theme is the default
    pub is_default: bool,
}

/// Insert shape for a theme
#[derive(Debug, Clone, Serialize)]
pub struct NewTheme {
    /// Owning design system
    pub design_system_id: String,
    /// Theme name
    pub name: String,
    /// Color bag
    pub colors: serde_json::Value,
    /// Typography bag
    pub typography: serde_json::Value,
    /// Spacing bag
    pub spacing: serde_json::Value,
    /// Whether this theme is the default
    pub is_default: bool,
}

/// A version history row (append-only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Version {
    /// Row identifier
    pub id: String,
    /// Owning design system
    pub design_system_id: String,
    /// Monotonically increasing version number
    pub version_number: i32,
    /// Full data snapshot at this version
    pub data: serde_json::Value,
    /// Optional changelog text
    pub changelog: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a version
#[derive(Debug, Clone, Serialize)]
pub struct NewVersion {
    /// Owning design system
    pub design_system_id: String,
    /// Version number (previous max + 1)
    pub version_number: i32,
    /// Full data snapshot
    pub data: serde_json::Value,
    /// Optional changelog text
    pub changelog: Option<String>,
}

/// A user profile row mirroring the auth user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Auth user identifier
    pub id: String,
    /// Email address
    pub email: Option<String>,
    /// Display name
    pub display_name: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a user profile
#[derive(Debug, Clone, Serialize)]
pub struct NewUserProfile {
    /// Auth user identifier
    pub id: String,
    /// Email address
    pub email: Option<String>,
    /// Display name
    pub display_name: Option<String>,
}

/// A favorite row (one per user per design system)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    /// Row identifier
    pub id: String,
    /// Favorited design system
    pub design_system_id: String,
    /// Favoriting user
    pub user_id: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a favorite
#[derive(Debug, Clone, Serialize)]
pub struct NewFavorite {
    /// Favorited design system
    pub design_system_id: String,
    /// Favoriting user
    pub user_id: String,
}

/// A rating row (one per user per design system)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    /// Row identifier
    pub id: String,
    /// Rated design system
    pub design_system_id: String,
    /// Rating user
    pub user_id: String,
    /// Rating value in 1..=5
    pub rating: i32,
    /// Optional comment
    pub comment: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a rating
#[derive(Debug, Clone, Serialize)]
pub struct NewRating {
    /// Rated design system
    pub design_system_id: String,
    /// Rating user
    pub user_id: String,
    /// Rating value in 1..=5
    pub rating: i32,
    /// Optional comment
    pub comment: Option<String>,
}
