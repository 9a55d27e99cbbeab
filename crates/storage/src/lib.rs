//! Storage layer for Design Loom
//!
//! This crate provides the local key-value store and the offline
//! fallback store used when no hosted backend is configured.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod local;

pub use kv::{KvConfig, KvError, KvStore};
pub use local::{
    LocalStore, LocalStoreError, StoredComponent, StoredDesignSystem, StoredRating, StoredTheme,
    StoredVersion,
};
