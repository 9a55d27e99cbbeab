//! Offline fallback store for design systems
//!
//! Used only when no hosted backend is configured. Everything lives in a
//! single serialized array under one key, so every write deserializes the
//! whole array, mutates it and writes it back. Fine for a single local
//! user, not safe against concurrent writers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::kv::{KvError, KvStore};

/// Key under which the design system array is stored
const STORE_KEY: &str = "design_systems";

/// Errors from the local fallback store
#[derive(Debug, Error)]
pub enum LocalStoreError {
    /// Underlying key-value store error
    #[error("Key-value store error: {0}")]
    Kv(#[from] KvError),

    /// Design system not found
    #[error("Design system not found: {0}")]
    NotFound(String),
}

/// Result type for local store operations
pub type Result<T> = std::result::Result<T, LocalStoreError>;

/// A component embedded in a stored design system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredComponent {
    /// Component name
    pub name: String,
    /// Component type (e.g., "button", "card")
    pub component_type: String,
    /// Property bag
    pub props: serde_json::Value,
    /// Style bag
    pub styles: serde_json::Value,
    /// Order within the design system
    pub sort_order: i32,
}

/// A theme embedded in a stored design system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredTheme {
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

/// A version snapshot embedded in a stored design system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredVersion {
    /// Monotonically increasing version number
    pub version_number: i32,
    /// Full data snapshot at this version
    pub data: serde_json::Value,
    /// Optional changelog text
    pub changelog: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A rating embedded in a stored design system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredRating {
    /// Rating user
    pub user_id: String,
    /// Rating value in 1..=5
    pub rating: i32,
    /// Optional comment
    pub comment: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A design system as stored locally, with components and themes embedded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredDesignSystem {
    /// Generated identifier
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
    /// Opaque token for unauthenticated read access
    pub share_token: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Favorite count
    pub favorite_count: i64,
    /// Rating aggregate (mean)
    pub rating: f64,
    /// Embedded components
    pub components: Vec<StoredComponent>,
    /// Embedded themes
    pub themes: Vec<StoredTheme>,
    /// Embedded version history
    pub versions: Vec<StoredVersion>,
    /// Users who favorited this design system
    #[serde(default)]
    pub favorited_by: Vec<String>,
    /// Embedded ratings
    #[serde(default)]
    pub ratings: Vec<StoredRating>,
}

/// Local fallback store for design systems
#[derive(Clone)]
pub struct LocalStore {
    kv: KvStore,
}

impl LocalStore {
    /// Create a store on top of an opened key-value store
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        Ok(Self { kv: KvStore::in_memory()? })
    }

    /// Generate a local identifier: prefix + millisecond timestamp + random suffix
    pub fn generate_id() -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("local-{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
    }

    fn load_all(&self) -> Result<Vec<StoredDesignSystem>> {
        Ok(self.kv.get(STORE_KEY)?.unwrap_or_default())
    }

    fn save_all(&self, systems: &[StoredDesignSystem]) -> Result<()> {
        self.kv.set(STORE_KEY, &systems.to_vec())?;
        Ok(())
    }

    /// Persist a new design system, assigning it a generated id
    ///
    /// Returns the assigned identifier.
    pub fn save(&self, mut system: StoredDesignSystem) -> Result<String> {
        if system.id.is_empty() {
            system.id = Self::generate_id();
        }
        let id = system.id.clone();

        let mut systems = self.load_all()?;
        systems.push(system);
        self.save_all(&systems)?;

        tracing::debug!(id = %id, "saved design system to local store");
        Ok(id)
    }

    /// Fetch a design system by identifier
    pub fn get(&self, id: &str) -> Result<Option<StoredDesignSystem>> {
        let systems = self.load_all()?;
        Ok(systems.into_iter().find(|s| s.id == id))
    }

    /// Fetch a design system by share token
    pub fn get_by_share_token(&self, token: &str) -> Result<Option<StoredDesignSystem>> {
        let systems = self.load_all()?;
        Ok(systems.into_iter().find(|s| s.share_token == token))
    }

    /// List all design systems owned by a user, newest update first
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<StoredDesignSystem>> {
        let mut systems: Vec<StoredDesignSystem> = self
            .load_all()?
            .into_iter()
            .filter(|s| s.user_id.as_deref() == Some(user_id))
            .collect();

        systems.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(systems)
    }

    /// List all public design systems, newest update first
    pub fn list_public(&self) -> Result<Vec<StoredDesignSystem>> {
        let mut systems: Vec<StoredDesignSystem> =
            self.load_all()?.into_iter().filter(|s| s.is_public).collect();

        systems.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(systems)
    }

    /// Replace a stored design system in place, bumping its update timestamp
    pub fn update<F>(&self, id: &str, mutate: F) -> Result<StoredDesignSystem>
    where
        F: FnOnce(&mut StoredDesignSystem),
    {
        let mut systems = self.load_all()?;
        let entry = systems
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| LocalStoreError::NotFound(id.to_string()))?;

        mutate(entry);
        entry.updated_at = Utc::now();
        let updated = entry.clone();

        self.save_all(&systems)?;
        Ok(updated)
    }

    /// Delete a design system, returning whether it existed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut systems = self.load_all()?;
        let before = systems.len();
        systems.retain(|s| s.id != id);
        let removed = systems.len() != before;

        if removed {
            self.save_all(&systems)?;
        }
        Ok(removed)
    }
}
