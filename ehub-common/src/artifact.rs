//! Model artifact formats
//!
//! Two on-disk formats carry the same fitted model:
//!
//! - **Full**: four JSON files (fitted model, two label encoders, metadata)
//!   that must be loaded together.
//! - **Lite**: one JSON document holding intercept, coefficients, feature
//!   names and both vocabularies, scored with a plain dot product.

use crate::encoding::LabelEncoder;
use crate::housing::{default_locations, default_types};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Fitted model file of the full artifact
pub const MODEL_FILE: &str = "addis_house_model.json";
/// Location encoder file of the full artifact
pub const LOCATION_ENCODER_FILE: &str = "addis_location_encoder.json";
/// Type encoder file of the full artifact
pub const TYPE_ENCODER_FILE: &str = "addis_type_encoder.json";
/// Metadata file of the full artifact
pub const METADATA_FILE: &str = "housing_metadata.json";
/// Single-document lite artifact
pub const LITE_FILE: &str = "addis_house_lite.json";

/// Fitted ordinary least squares model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub feature_names: Vec<String>,
}

impl LinearModel {
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// `intercept + Σ coefficients[i] × features[i]`
    ///
    /// Callers are responsible for matching lengths; extra entries on either
    /// side are ignored.
    pub fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

/// Vocabularies published to clients through the metadata endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingMetadata {
    pub locations: Vec<String>,
    pub types: Vec<String>,
}

impl Default for HousingMetadata {
    /// Built-in vocabulary: 12 locations, 3 types
    fn default() -> Self {
        Self {
            locations: default_locations(),
            types: default_types(),
        }
    }
}

/// Lite artifact: everything needed to score without the fitted model object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub feature_names: Vec<String>,
    pub locations: Vec<String>,
    pub types: Vec<String>,
}

impl ModelArtifact {
    /// Flatten a fitted model and its encoders into the lite form
    pub fn from_parts(model: &LinearModel, locations: &LabelEncoder, types: &LabelEncoder) -> Self {
        Self {
            intercept: model.intercept,
            coefficients: model.coefficients.clone(),
            feature_names: model.feature_names.clone(),
            locations: locations.classes.clone(),
            types: types.classes.clone(),
        }
    }

    /// Write the lite artifact into `models_dir`, replacing any previous one
    pub fn save(&self, models_dir: &Path) -> Result<()> {
        fs::create_dir_all(models_dir)?;
        write_json(&models_dir.join(LITE_FILE), self)
    }

    /// Read a complete lite artifact; missing keys are an error here
    pub fn load(models_dir: &Path) -> Result<Self> {
        let artifact: Self = read_json(&models_dir.join(LITE_FILE))?;
        if artifact.coefficients.len() != artifact.feature_names.len() {
            return Err(Error::InvalidInput(format!(
                "{} coefficients for {} feature names",
                artifact.coefficients.len(),
                artifact.feature_names.len()
            )));
        }
        Ok(artifact)
    }
}

/// Lenient view of the lite document used at service startup
///
/// Every key is optional so a partially written artifact still yields
/// whatever it does contain.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PartialArtifact {
    #[serde(default)]
    pub intercept: Option<f64>,
    #[serde(default)]
    pub coefficients: Option<Vec<f64>>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    #[serde(default)]
    pub locations: Option<Vec<String>>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
}

impl PartialArtifact {
    pub fn read(models_dir: &Path) -> Result<Self> {
        read_json(&models_dir.join(LITE_FILE))
    }

    /// Names of the keys absent from the document
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.intercept.is_none() {
            missing.push("intercept");
        }
        if self.coefficients.is_none() {
            missing.push("coefficients");
        }
        if self.feature_names.is_none() {
            missing.push("feature_names");
        }
        if self.locations.is_none() {
            missing.push("locations");
        }
        if self.types.is_none() {
            missing.push("types");
        }
        missing
    }

    /// Vocabularies present in the document, defaults for the rest
    pub fn metadata_or_default(&self) -> HousingMetadata {
        HousingMetadata {
            locations: self.locations.clone().unwrap_or_else(default_locations),
            types: self.types.clone().unwrap_or_else(default_types),
        }
    }

    /// Complete artifact if every key is present and lengths agree
    pub fn complete(&self) -> Option<ModelArtifact> {
        let coefficients = self.coefficients.clone()?;
        let feature_names = self.feature_names.clone()?;
        if coefficients.len() != feature_names.len() {
            return None;
        }
        Some(ModelArtifact {
            intercept: self.intercept?,
            coefficients,
            feature_names,
            locations: self.locations.clone()?,
            types: self.types.clone()?,
        })
    }
}

/// Full artifact: fitted model plus encoders plus metadata
#[derive(Debug, Clone, PartialEq)]
pub struct FullArtifact {
    pub model: LinearModel,
    pub location_encoder: LabelEncoder,
    pub type_encoder: LabelEncoder,
    pub metadata: HousingMetadata,
}

impl FullArtifact {
    pub fn new(model: LinearModel, location_encoder: LabelEncoder, type_encoder: LabelEncoder) -> Self {
        let metadata = HousingMetadata {
            locations: location_encoder.classes.clone(),
            types: type_encoder.classes.clone(),
        };
        Self {
            model,
            location_encoder,
            type_encoder,
            metadata,
        }
    }

    /// True when all four files are present
    pub fn exists(models_dir: &Path) -> bool {
        [MODEL_FILE, LOCATION_ENCODER_FILE, TYPE_ENCODER_FILE, METADATA_FILE]
            .iter()
            .all(|name| models_dir.join(name).is_file())
    }

    /// Write all four files into `models_dir`
    pub fn save(&self, models_dir: &Path) -> Result<()> {
        fs::create_dir_all(models_dir)?;
        write_json(&models_dir.join(MODEL_FILE), &self.model)?;
        write_json(&models_dir.join(LOCATION_ENCODER_FILE), &self.location_encoder)?;
        write_json(&models_dir.join(TYPE_ENCODER_FILE), &self.type_encoder)?;
        write_json(&models_dir.join(METADATA_FILE), &self.metadata)
    }

    /// Load all four files; any failure fails the whole load
    pub fn load(models_dir: &Path) -> Result<Self> {
        Ok(Self {
            model: read_json(&models_dir.join(MODEL_FILE))?,
            location_encoder: read_json(&models_dir.join(LOCATION_ENCODER_FILE))?,
            type_encoder: read_json(&models_dir.join(TYPE_ENCODER_FILE))?,
            metadata: read_json(&models_dir.join(METADATA_FILE))?,
        })
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
