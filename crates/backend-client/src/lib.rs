//! HTTP client for the hosted backend service
//!
//! This crate talks to the Postgres-as-a-service backend over its
//! auto-generated REST endpoint and its auth service. It is the single
//! persistence client for the application; callers select it (or the
//! local fallback store) through configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod rest;

pub use auth::{AuthClient, AuthUser, Session, UserPatch};
pub use config::BackendConfig;
pub use error::RestError;
pub use rest::{Filters, RestClient, SortDirection};
