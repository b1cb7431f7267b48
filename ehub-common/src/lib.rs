//! # EthioML Hub Common Library
//!
//! Shared code for the housing price pipeline:
//! - Housing record and request types
//! - Label encoding of categorical columns
//! - Model artifact formats (full and lite)
//! - Scoring strategies over a loaded artifact
//! - CSV dataset reading/writing
//! - Configuration loading

pub mod artifact;
pub mod config;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod housing;
pub mod scoring;

pub use encoding::LabelEncoder;
pub use error::{Error, Result};
pub use housing::{HouseFeatures, HouseRecord};
