//! Scoring strategies
//!
//! A [`Scorer`] turns a [`HouseFeatures`] request into a raw price. Both
//! implementations share categorical encoding and feature assembly; they
//! differ in how the dot product is evaluated:
//!
//! - [`NativeScorer`] delegates to the fitted [`LinearModel`] and rejects a
//!   feature vector whose width does not match the model.
//! - [`LinearScorer`] walks the coefficient list by hand and tolerates a short
//!   list, scoring only the features it has weights for.

use crate::artifact::{FullArtifact, LinearModel, ModelArtifact};
use crate::encoding::LabelEncoder;
use crate::housing::HouseFeatures;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure while scoring a single request
#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("X has {actual} features, but the model is expecting {expected} features as input")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("prediction is not a finite number: {0}")]
    NonFinite(f64),
}

/// Which artifact format backs a scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerKind {
    Native,
    Linear,
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerKind::Native => write!(f, "native"),
            ScorerKind::Linear => write!(f, "linear"),
        }
    }
}

/// Price scoring capability selected at startup
pub trait Scorer: Send + Sync {
    fn kind(&self) -> ScorerKind;

    /// Vocabulary used to encode `Location`
    fn locations(&self) -> &LabelEncoder;

    /// Vocabulary used to encode `Type`
    fn types(&self) -> &LabelEncoder;

    /// Raw model output for an already encoded feature vector
    fn score_vector(&self, features: &[f64]) -> Result<f64, ScoreError>;

    /// Encode, assemble and score one request
    ///
    /// Unknown categorical values encode to index 0. The result is not
    /// clamped.
    fn score(&self, input: &HouseFeatures) -> Result<f64, ScoreError> {
        let location_index = encode_lenient(self.locations(), "Location", &input.location);
        let type_index = encode_lenient(self.types(), "Type", &input.house_type);
        let features = input.to_vector(location_index, type_index);

        let raw = self.score_vector(&features)?;
        if !raw.is_finite() {
            return Err(ScoreError::NonFinite(raw));
        }
        Ok(raw)
    }
}

fn encode_lenient(encoder: &LabelEncoder, column: &str, value: &str) -> usize {
    match encoder.position(value) {
        Some(index) => index,
        None => {
            debug!("Unknown {} value '{}', encoding as 0", column, value);
            0
        }
    }
}

/// Scores through the fitted model of a full artifact
#[derive(Debug, Clone)]
pub struct NativeScorer {
    model: LinearModel,
    locations: LabelEncoder,
    types: LabelEncoder,
}

impl NativeScorer {
    pub fn new(model: LinearModel, locations: LabelEncoder, types: LabelEncoder) -> Self {
        Self {
            model,
            locations,
            types,
        }
    }

    pub fn from_artifact(artifact: FullArtifact) -> Self {
        Self::new(artifact.model, artifact.location_encoder, artifact.type_encoder)
    }
}

impl Scorer for NativeScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Native
    }

    fn locations(&self) -> &LabelEncoder {
        &self.locations
    }

    fn types(&self) -> &LabelEncoder {
        &self.types
    }

    fn score_vector(&self, features: &[f64]) -> Result<f64, ScoreError> {
        if features.len() != self.model.n_features() {
            return Err(ScoreError::FeatureMismatch {
                expected: self.model.n_features(),
                actual: features.len(),
            });
        }
        Ok(self.model.predict(features))
    }
}

/// Manual dot product over lite artifact coefficients
#[derive(Debug, Clone)]
pub struct LinearScorer {
    intercept: f64,
    coefficients: Vec<f64>,
    locations: LabelEncoder,
    types: LabelEncoder,
}

impl LinearScorer {
    pub fn new(
        intercept: f64,
        coefficients: Vec<f64>,
        locations: LabelEncoder,
        types: LabelEncoder,
    ) -> Self {
        Self {
            intercept,
            coefficients,
            locations,
            types,
        }
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self::new(
            artifact.intercept,
            artifact.coefficients,
            LabelEncoder::new(artifact.locations),
            LabelEncoder::new(artifact.types),
        )
    }
}

impl Scorer for LinearScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Linear
    }

    fn locations(&self) -> &LabelEncoder {
        &self.locations
    }

    fn types(&self) -> &LabelEncoder {
        &self.types
    }

    fn score_vector(&self, features: &[f64]) -> Result<f64, ScoreError> {
        if self.coefficients.len() < features.len() {
            warn!(
                "Only {} coefficients for {} features; scoring the first {}",
                self.coefficients.len(),
                features.len(),
                self.coefficients.len()
            );
        }

        let mut prediction = self.intercept;
        for (x, w) in features.iter().zip(&self.coefficients) {
            prediction += x * w;
        }
        Ok(prediction)
    }
}
