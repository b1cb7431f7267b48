//! Price prediction endpoint

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use ehub_common::HouseFeatures;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::ApiResult;
use crate::format::format_etb;
use crate::AppState;

const LOADING_NOTE: &str = "Model is still loading or failed to load.";

/// Prediction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Clamped price, two decimals with thousands separators
    pub estimated_price_etb: String,
    /// Clamped price as a number
    pub raw_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PredictionResponse {
    fn priced(raw: f64) -> Self {
        let price = raw.max(0.0);
        Self {
            estimated_price_etb: format_etb(price),
            raw_price: price,
            note: None,
        }
    }

    fn loading() -> Self {
        Self {
            estimated_price_etb: format_etb(0.0),
            raw_price: 0.0,
            note: Some(LOADING_NOTE.to_string()),
        }
    }
}

/// POST /predict/addis-house
///
/// Without a scorer the request still succeeds with a zero price and a note.
/// Unknown `Location`/`Type` values score as index 0.
pub async fn predict_house(
    State(state): State<AppState>,
    payload: Result<Json<HouseFeatures>, JsonRejection>,
) -> ApiResult<Json<PredictionResponse>> {
    let Json(input) = payload?;

    let Some(scorer) = state.model.scorer() else {
        debug!("Prediction requested with no model loaded");
        return Ok(Json(PredictionResponse::loading()));
    };

    let raw = scorer.score(&input).map_err(|e| {
        error!("Prediction failed for {:?}: {}", input, e);
        e
    })?;
    debug!("Predicted {:.2} ETB with {} scorer", raw, scorer.kind());

    Ok(Json(PredictionResponse::priced(raw)))
}
