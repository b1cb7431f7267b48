//! Artifact export

use crate::trainer::TrainedModel;
use ehub_common::artifact::{
    LITE_FILE, LOCATION_ENCODER_FILE, METADATA_FILE, MODEL_FILE, TYPE_ENCODER_FILE,
};
use ehub_common::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Which artifact format(s) to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Full,
    Lite,
    #[default]
    Both,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(ExportFormat::Full),
            "lite" => Ok(ExportFormat::Lite),
            "both" => Ok(ExportFormat::Both),
            other => Err(Error::InvalidInput(format!(
                "unknown export format '{}' (expected full, lite or both)",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Full => write!(f, "full"),
            ExportFormat::Lite => write!(f, "lite"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}

/// Write the requested artifacts into `models_dir`; returns the written paths
pub fn export(trained: &TrainedModel, models_dir: &Path, format: ExportFormat) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Full | ExportFormat::Both) {
        trained.full_artifact().save(models_dir)?;
        written.extend(
            [MODEL_FILE, LOCATION_ENCODER_FILE, TYPE_ENCODER_FILE, METADATA_FILE]
                .iter()
                .map(|name| models_dir.join(name)),
        );
        info!("Full artifact written to {}", models_dir.display());
    }

    if matches!(format, ExportFormat::Lite | ExportFormat::Both) {
        trained.lite_artifact().save(models_dir)?;
        written.push(models_dir.join(LITE_FILE));
        info!("Lite artifact written to {}", models_dir.join(LITE_FILE).display());
    }

    Ok(written)
}
