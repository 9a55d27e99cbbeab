//! HTTP surface for Design Loom
//!
//! Exposes the design-system CRUD routes plus the legacy SQL-proxy
//! endpoint, all under `/api`. Handlers live in [`handlers`]; error
//! mapping in [`error`].
//!
//! # Examples
//!
//! ```no_run
//! use app_state::AppState;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::from_env()?;
//! let app = api::router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

mod error;
mod handlers;
mod sql_proxy;

pub use error::{ApiError, ApiResult};

use app_state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/design-systems", get(handlers::list).post(handlers::create))
        .route(
            "/api/design-systems/{id}",
            get(handlers::get).put(handlers::update).delete(handlers::delete),
        )
        .route("/api/design-systems/{id}/favorite", post(handlers::favorite))
        .route("/api/design-systems/{id}/rate", post(handlers::rate))
        .route("/api/design-systems/{id}/toggle-public", post(handlers::toggle_public))
        .route("/api/design-systems/{id}/versions", get(handlers::versions))
        .route("/api/design-systems/shared/{token}", get(handlers::shared))
        .route("/api/supabase-mcp", post(sql_proxy::sql_proxy))
        .with_state(state)
}
