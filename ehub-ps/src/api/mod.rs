//! HTTP API handlers for ehub-ps

pub mod health;
pub mod metadata;
pub mod predict;

pub use health::{health_routes, root_status};
pub use metadata::housing_metadata;
pub use predict::predict_house;
