//! ehub-ps library - housing price prediction service
//!
//! Serves price estimates from the artifacts written by ehub-tr. Artifacts
//! are loaded once at startup; handlers share the result read-only.

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod format;
pub mod model;

pub use error::{ApiError, ApiResult};
pub use model::{LoadedModel, ModelLoader, ModelState, ScorerPreference};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Startup loading result, immutable after construction
    pub model: Arc<LoadedModel>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: Arc::new(model),
            started_at: Utc::now(),
        }
    }
}

/// Build application router
///
/// Metadata and prediction routes are reachable with and without the `/api`
/// prefix.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::root_status))
        .route("/metadata/housing", get(api::housing_metadata))
        .route("/api/metadata/housing", get(api::housing_metadata))
        .route("/predict/addis-house", post(api::predict_house))
        .route("/api/predict/addis-house", post(api::predict_house))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Any origin, method and header
        .layer(CorsLayer::permissive())
}
