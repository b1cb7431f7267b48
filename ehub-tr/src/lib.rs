//! ehub-tr library - ordinary least squares trainer
//!
//! Reads the generated dataset, label-encodes `Location` and `Type` with
//! vocabularies derived from the data, fits a linear model and exports the
//! full and/or lite artifacts consumed by the prediction service.

pub mod dataset;
pub mod export;
pub mod ols;
pub mod trainer;

pub use dataset::{locate_dataset, DATA_DIR_CANDIDATES};
pub use export::{export, ExportFormat};
pub use trainer::{train, TrainedModel, TrainingReport};
