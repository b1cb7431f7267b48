//! Housing record types and the fixed feature layout
//!
//! Column names follow the CSV header written by the generator and the JSON
//! body accepted by the prediction service (`Location`, `Type`, `Area`, ...).

use serde::{Deserialize, Serialize};

/// Number of model features
pub const FEATURE_COUNT: usize = 7;

/// Feature order used for training and scoring
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Location",
    "Type",
    "Area",
    "Bedrooms",
    "Bathrooms",
    "Age",
    "Distance_to_Center",
];

/// Built-in location vocabulary, sorted the way a trainer derives it
pub const DEFAULT_LOCATIONS: [&str; 12] = [
    "Akaki",
    "Ayat",
    "Bole",
    "CMC",
    "Gullele",
    "Jemo",
    "Kazanchis",
    "Lebu",
    "Old Airport",
    "Piassa",
    "Sarbet",
    "Summit",
];

/// Built-in house type vocabulary, sorted
pub const DEFAULT_TYPES: [&str; 3] = ["Apartment", "Condominium", "Villa"];

/// Minimum generated price in ETB
pub const PRICE_FLOOR_ETB: f64 = 1_800_000.0;

/// One labeled row of the training dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseRecord {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Type")]
    pub house_type: String,
    #[serde(rename = "Area")]
    pub area: f64,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: u32,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: u32,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Distance_to_Center")]
    pub distance_to_center: f64,
    #[serde(rename = "Price")]
    pub price: f64,
}

impl HouseRecord {
    /// Drop the label, keeping the inputs the service would receive
    pub fn features(&self) -> HouseFeatures {
        HouseFeatures {
            location: self.location.clone(),
            house_type: self.house_type.clone(),
            area: self.area,
            bedrooms: i64::from(self.bedrooms),
            bathrooms: i64::from(self.bathrooms),
            age: i64::from(self.age),
            distance_to_center: self.distance_to_center,
        }
    }
}

/// Prediction input: a house record without `Price`
///
/// Integer fields are signed and unvalidated; the service scores whatever it
/// receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseFeatures {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Type")]
    pub house_type: String,
    #[serde(rename = "Area")]
    pub area: f64,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: i64,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: i64,
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Distance_to_Center")]
    pub distance_to_center: f64,
}

impl HouseFeatures {
    /// Assemble the feature vector in [`FEATURE_NAMES`] order
    ///
    /// `location_index` and `type_index` are the already-encoded categorical
    /// values.
    pub fn to_vector(&self, location_index: usize, type_index: usize) -> [f64; FEATURE_COUNT] {
        [
            location_index as f64,
            type_index as f64,
            self.area,
            self.bedrooms as f64,
            self.bathrooms as f64,
            self.age as f64,
            self.distance_to_center,
        ]
    }
}

/// Owned copy of a built-in vocabulary
pub fn default_locations() -> Vec<String> {
    DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect()
}

/// Owned copy of the built-in type vocabulary
pub fn default_types() -> Vec<String> {
    DEFAULT_TYPES.iter().map(|s| s.to_string()).collect()
}
