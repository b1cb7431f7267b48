//! ehub-dg library - synthetic Addis Ababa housing data
//!
//! Generates labeled house records from a fixed price model and a fixed
//! seed, so the training set is reproducible byte for byte.

pub mod generator;

pub use generator::{
    generate, summarize, GenerationSummary, HouseGenerator, DEFAULT_COUNT, DEFAULT_SEED,
};
