//! Label encoding for categorical columns
//!
//! A vocabulary is an ordered list of distinct values; a value encodes to its
//! zero-based position. Values outside the vocabulary encode to 0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordered vocabulary for one categorical column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Wrap an existing vocabulary, keeping its order
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Derive the vocabulary from observed values: distinct, sorted
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        Self {
            classes: distinct.into_iter().collect(),
        }
    }

    /// Position of `value`, if present
    pub fn position(&self, value: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == value)
    }

    /// Encode `value`, falling back to index 0 when it is unknown
    pub fn encode(&self, value: &str) -> usize {
        self.position(value).unwrap_or(0)
    }
}
