//! Startup artifact loading
//!
//! The models directory is inspected exactly once. The loader moves through
//! `Uninitialized → Loading` and ends in one of three terminal states:
//!
//! - `LoadedFull`: a complete full or lite artifact was loaded
//! - `LoadedPartial`: the lite document parsed but keys were missing or
//!   inconsistent; missing vocabularies come from the built-in defaults
//! - `LoadFailedUsingDefaults`: nothing loadable; built-in vocabularies, no
//!   scorer
//!
//! [`ModelLoader::load`] consumes the loader, so a second load is impossible.
//! No failure here is fatal.

use ehub_common::artifact::{FullArtifact, HousingMetadata, ModelArtifact, PartialArtifact, LITE_FILE};
use ehub_common::scoring::{LinearScorer, NativeScorer, Scorer};
use ehub_common::{Error, LabelEncoder};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

/// Artifact loading lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    Uninitialized,
    Loading,
    LoadedFull,
    LoadedPartial,
    LoadFailedUsingDefaults,
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelState::Uninitialized => "uninitialized",
            ModelState::Loading => "loading",
            ModelState::LoadedFull => "loaded_full",
            ModelState::LoadedPartial => "loaded_partial",
            ModelState::LoadFailedUsingDefaults => "load_failed_using_defaults",
        };
        write!(f, "{}", s)
    }
}

/// Which artifact format(s) the loader may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorerPreference {
    /// Full artifact if present, else lite
    #[default]
    Auto,
    /// Full artifact only
    Native,
    /// Lite artifact only
    Linear,
}

impl FromStr for ScorerPreference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ScorerPreference::Auto),
            "native" => Ok(ScorerPreference::Native),
            "linear" => Ok(ScorerPreference::Linear),
            other => Err(Error::InvalidInput(format!(
                "unknown scorer '{}' (expected auto, native or linear)",
                other
            ))),
        }
    }
}

impl fmt::Display for ScorerPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerPreference::Auto => write!(f, "auto"),
            ScorerPreference::Native => write!(f, "native"),
            ScorerPreference::Linear => write!(f, "linear"),
        }
    }
}

/// Immutable result of startup loading, shared by all request handlers
pub struct LoadedModel {
    state: ModelState,
    scorer: Option<Box<dyn Scorer>>,
    metadata: HousingMetadata,
}

impl LoadedModel {
    /// Built-in vocabularies and no scorer
    pub fn defaults() -> Self {
        Self {
            state: ModelState::LoadFailedUsingDefaults,
            scorer: None,
            metadata: HousingMetadata::default(),
        }
    }

    fn full(artifact: FullArtifact) -> Self {
        let metadata = artifact.metadata.clone();
        Self {
            state: ModelState::LoadedFull,
            scorer: Some(Box::new(NativeScorer::from_artifact(artifact))),
            metadata,
        }
    }

    fn lite(artifact: ModelArtifact) -> Self {
        let metadata = HousingMetadata {
            locations: artifact.locations.clone(),
            types: artifact.types.clone(),
        };
        Self {
            state: ModelState::LoadedFull,
            scorer: Some(Box::new(LinearScorer::from_artifact(artifact))),
            metadata,
        }
    }

    fn partial(artifact: PartialArtifact) -> Self {
        let metadata = artifact.metadata_or_default();

        let scorer: Option<Box<dyn Scorer>> = match artifact.coefficients {
            Some(coefficients) if !coefficients.is_empty() => {
                let intercept = artifact.intercept.unwrap_or_else(|| {
                    warn!("Lite artifact has no intercept, using 0");
                    0.0
                });
                Some(Box::new(LinearScorer::new(
                    intercept,
                    coefficients,
                    LabelEncoder::new(metadata.locations.clone()),
                    LabelEncoder::new(metadata.types.clone()),
                )))
            }
            _ => {
                warn!("Lite artifact has no coefficients; predictions will report loading");
                None
            }
        };

        Self {
            state: ModelState::LoadedPartial,
            scorer,
            metadata,
        }
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    /// Scorer, if coefficients were loaded
    pub fn scorer(&self) -> Option<&dyn Scorer> {
        self.scorer.as_deref()
    }

    pub fn metadata(&self) -> &HousingMetadata {
        &self.metadata
    }
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("state", &self.state)
            .field("scorer", &self.scorer.as_ref().map(|s| s.kind()))
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// One-shot loader for the models directory
#[derive(Debug)]
pub struct ModelLoader {
    models_dir: PathBuf,
    preference: ScorerPreference,
    state: ModelState,
}

impl ModelLoader {
    pub fn new(models_dir: impl Into<PathBuf>, preference: ScorerPreference) -> Self {
        Self {
            models_dir: models_dir.into(),
            preference,
            state: ModelState::Uninitialized,
        }
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    /// Load artifacts and settle into a terminal state
    pub fn load(mut self) -> LoadedModel {
        self.state = ModelState::Loading;
        info!(
            "Loading models from {} (scorer: {})",
            self.models_dir.display(),
            self.preference
        );

        let loaded = match self.preference {
            ScorerPreference::Auto => self.try_full().or_else(|| self.try_lite()),
            ScorerPreference::Native => self.try_full(),
            ScorerPreference::Linear => self.try_lite(),
        };

        let loaded = loaded.unwrap_or_else(|| {
            warn!(
                "No usable model artifact in {}; serving built-in metadata",
                self.models_dir.display()
            );
            LoadedModel::defaults()
        });

        match loaded.scorer() {
            Some(scorer) => info!("Model state: {} ({} scorer)", loaded.state(), scorer.kind()),
            None => info!("Model state: {} (no scorer)", loaded.state()),
        }
        loaded
    }

    fn try_full(&self) -> Option<LoadedModel> {
        if !FullArtifact::exists(&self.models_dir) {
            debug!("Full artifact not present in {}", self.models_dir.display());
            return None;
        }

        match FullArtifact::load(&self.models_dir) {
            Ok(artifact) => {
                info!("Full artifact loaded successfully");
                Some(LoadedModel::full(artifact))
            }
            Err(e) => {
                error!("Error loading full artifact: {}", e);
                None
            }
        }
    }

    fn try_lite(&self) -> Option<LoadedModel> {
        let path = self.models_dir.join(LITE_FILE);
        if !path.is_file() {
            debug!("Lite artifact not present at {}", path.display());
            return None;
        }

        let partial = match PartialArtifact::read(&self.models_dir) {
            Ok(partial) => partial,
            Err(e) => {
                error!("Error loading lite artifact {}: {}", path.display(), e);
                return None;
            }
        };

        if let Some(artifact) = partial.complete() {
            info!("Lite artifact loaded successfully");
            return Some(LoadedModel::lite(artifact));
        }

        let missing = partial.missing_keys();
        if missing.is_empty() {
            warn!("Lite artifact coefficients and feature_names differ in length");
        } else {
            warn!("Lite artifact missing keys {:?}; merging defaults", missing);
        }
        Some(LoadedModel::partial(partial))
    }
}
