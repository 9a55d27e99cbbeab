//! UI layer for Design Loom
//!
//! Presentational building blocks: color math for themes, class-name
//! merging, and the component primitives rendered by the frontend.
//!
//! # Modules
//!
//! - [`theme`] - Pure color utilities (opacity, brightness, palettes)
//! - [`classes`] - Conditional class-name merging with conflict resolution
//! - [`components`] - UI component primitives
//! - [`cards`] - Example components composed from the primitives

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cards;
pub mod classes;
pub mod components;
pub mod theme;

pub use classes::{merge_classes, ClassList};
pub use components::{
    Avatar, Badge, Button, ButtonSize, ButtonVariant, Card, CardBody, CardFooter, CardHeader,
    Image, ImageState, Input, LoadingSpinner,
};
