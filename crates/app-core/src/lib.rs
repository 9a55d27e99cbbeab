//! Core application logic for Design Loom
//!
//! This crate contains the design-system service (create, browse,
//! version, favorite, rate, share) and the authentication service.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod service;

pub use auth::{AuthResponse, AuthService};
pub use service::{
    ComponentData, DesignSystemData, DesignSystemService, DesignSystemSummary, DesignSystemDetail,
    ListQuery, PublicListing, ServiceError, SortKey, ThemeData, UserListing, VersionEntry,
};
