//! Dataset discovery

use ehub_common::dataset::DATASET_FILE;
use ehub_common::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories searched, in order, when no data directory is configured
pub const DATA_DIR_CANDIDATES: [&str; 2] = ["data", "../data"];

/// Find the dataset file
///
/// With `data_dir` set only that directory is checked; otherwise each of
/// [`DATA_DIR_CANDIDATES`] relative to the working directory.
pub fn locate_dataset(data_dir: Option<&Path>) -> Result<PathBuf> {
    let candidates: Vec<PathBuf> = match data_dir {
        Some(dir) => vec![dir.join(DATASET_FILE)],
        None => DATA_DIR_CANDIDATES
            .iter()
            .map(|dir| Path::new(dir).join(DATASET_FILE))
            .collect(),
    };
    locate_in(candidates)
}

/// First existing file among `candidates`
pub fn locate_in(candidates: Vec<PathBuf>) -> Result<PathBuf> {
    for candidate in &candidates {
        debug!("Looking for dataset at {}", candidate.display());
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }
    Err(Error::DataNotFound(candidates))
}
