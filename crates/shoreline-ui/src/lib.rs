//! Rendering and interaction layer for Shoreline.
//!
//! Turns the domain model and forecast into escaped HTML regions and routes
//! user actions through the domain store.

pub mod controller;
pub mod error_mapping;
pub mod markup;
pub mod services;
pub mod surface;
pub mod view;

pub use controller::{Action, Controller};
pub use error_mapping::IntoAppError;
pub use markup::Markup;
pub use surface::{Page, Region, Surface};
