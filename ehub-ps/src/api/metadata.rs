//! Vocabulary endpoint

use axum::{extract::State, Json};
use ehub_common::artifact::HousingMetadata;

use crate::AppState;

/// GET /metadata/housing
///
/// Loaded vocabularies, or the built-in ones when no artifact supplied them.
pub async fn housing_metadata(State(state): State<AppState>) -> Json<HousingMetadata> {
    Json(state.model.metadata().clone())
}
