//! Encoding and model fitting

use crate::ols;
use ehub_common::artifact::{FullArtifact, LinearModel, ModelArtifact};
use ehub_common::housing::{FEATURE_COUNT, FEATURE_NAMES};
use ehub_common::{Error, HouseRecord, LabelEncoder, Result};
use ndarray::{Array1, Array2};
use tracing::warn;

/// Goodness of fit over the training set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub samples: usize,
    /// Independent directions in the centered feature matrix
    pub rank: usize,
    pub r_squared: f64,
    pub rmse: f64,
}

/// Fitted model plus the vocabularies used to encode its inputs
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pub model: LinearModel,
    pub locations: LabelEncoder,
    pub types: LabelEncoder,
    pub report: TrainingReport,
    /// Solver output for each training record, in input order
    pub fitted: Vec<f64>,
}

impl TrainedModel {
    pub fn full_artifact(&self) -> FullArtifact {
        FullArtifact::new(self.model.clone(), self.locations.clone(), self.types.clone())
    }

    pub fn lite_artifact(&self) -> ModelArtifact {
        ModelArtifact::from_parts(&self.model, &self.locations, &self.types)
    }
}

/// Fit the price model over `records`
///
/// Vocabularies are the sorted distinct `Location` and `Type` values present
/// in `records`. Constant or collinear columns are not an error; the
/// minimum-norm fit is kept and the lost rank is logged.
pub fn train(records: &[HouseRecord]) -> Result<TrainedModel> {
    if records.is_empty() {
        return Err(Error::Training("dataset has no records".to_string()));
    }

    let locations = LabelEncoder::fit(records.iter().map(|r| r.location.as_str()));
    let types = LabelEncoder::fit(records.iter().map(|r| r.house_type.as_str()));

    let x = Array2::from_shape_fn((records.len(), FEATURE_COUNT), |(i, j)| {
        let r = &records[i];
        match j {
            0 => locations.encode(&r.location) as f64,
            1 => types.encode(&r.house_type) as f64,
            2 => r.area,
            3 => f64::from(r.bedrooms),
            4 => f64::from(r.bathrooms),
            5 => f64::from(r.age),
            _ => r.distance_to_center,
        }
    });
    let y = Array1::from_iter(records.iter().map(|r| r.price));

    let fit = ols::fit(&x, &y)?;
    if fit.rank < FEATURE_COUNT {
        warn!(
            "Feature matrix has rank {} of {}; using the minimum-norm fit",
            fit.rank, FEATURE_COUNT
        );
    }
    let fitted = fit.predict(&x);
    let report = evaluate(&fitted, &y, fit.rank);

    let model = LinearModel {
        intercept: fit.intercept,
        coefficients: fit.coefficients.to_vec(),
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
    };

    Ok(TrainedModel {
        model,
        locations,
        types,
        report,
        fitted: fitted.to_vec(),
    })
}

fn evaluate(fitted: &Array1<f64>, y: &Array1<f64>, rank: usize) -> TrainingReport {
    let n = y.len();
    let mean = y.mean().unwrap_or(0.0);
    let ss_tot: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    let ss_res: f64 = y
        .iter()
        .zip(fitted.iter())
        .map(|(v, f)| (v - f).powi(2))
        .sum();

    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };
    TrainingReport {
        samples: n,
        rank,
        r_squared,
        rmse: (ss_res / n as f64).sqrt(),
    }
}
