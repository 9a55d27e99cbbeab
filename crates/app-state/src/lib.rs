//! Application state for Design Loom
//!
//! Explicit state structs with explicit lifecycle: session state is
//! initialised once, observed through a subscription, and torn down
//! deliberately rather than implicitly in framework hooks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod session;

pub use app::AppState;
pub use session::SessionState;
