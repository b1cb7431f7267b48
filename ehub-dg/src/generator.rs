//! Synthetic house record generator
//!
//! Price model:
//!
//! ```text
//! base  = area × price_per_m2[location] × type_multiplier[type]
//! price = base + bedrooms×600k + bathrooms×400k − age×200k − distance×300k
//!       + Normal(0, 0.08 × base)
//! ```
//!
//! clamped to the 1.8M ETB floor and rounded to the nearest 1000.
//!
//! Draw order per record is fixed (location, type, area, bedrooms,
//! bathrooms, age, noise); changing it changes every generated dataset.

use ehub_common::housing::PRICE_FLOOR_ETB;
use ehub_common::{Error, HouseRecord, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use std::collections::BTreeMap;
use std::ops::Range;

/// Default number of generated records
pub const DEFAULT_COUNT: usize = 1500;

/// Canonical seed of the training dataset
pub const DEFAULT_SEED: u64 = 42;

const BEDROOM_VALUE: f64 = 600_000.0;
const BATHROOM_VALUE: f64 = 400_000.0;
const AGE_DEPRECIATION: f64 = 200_000.0;
const DISTANCE_PENALTY: f64 = 300_000.0;
const NOISE_RATIO: f64 = 0.08;
const AGE_YEARS: Range<u32> = 0..35;

/// Neighborhood with its base price per m² (ETB) and distance to Piassa (km)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood {
    pub name: &'static str,
    pub price_per_m2: f64,
    pub distance_km: f64,
}

/// Neighborhood table; order determines the uniform draw
pub static NEIGHBORHOODS: [Neighborhood; 12] = [
    Neighborhood { name: "Bole", price_per_m2: 180_000.0, distance_km: 4.0 },
    Neighborhood { name: "Old Airport", price_per_m2: 175_000.0, distance_km: 5.0 },
    Neighborhood { name: "Kazanchis", price_per_m2: 170_000.0, distance_km: 1.0 },
    Neighborhood { name: "Sarbet", price_per_m2: 160_000.0, distance_km: 3.0 },
    Neighborhood { name: "CMC", price_per_m2: 120_000.0, distance_km: 10.0 },
    Neighborhood { name: "Lebu", price_per_m2: 110_000.0, distance_km: 9.0 },
    Neighborhood { name: "Ayat", price_per_m2: 100_000.0, distance_km: 13.0 },
    Neighborhood { name: "Summit", price_per_m2: 95_000.0, distance_km: 12.0 },
    Neighborhood { name: "Jemo", price_per_m2: 85_000.0, distance_km: 14.0 },
    Neighborhood { name: "Gullele", price_per_m2: 80_000.0, distance_km: 6.0 },
    Neighborhood { name: "Akaki", price_per_m2: 65_000.0, distance_km: 18.0 },
    Neighborhood { name: "Piassa", price_per_m2: 150_000.0, distance_km: 0.0 },
];

/// House type with draw probability, price multiplier and size ranges
///
/// Ranges are half-open.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseTypeProfile {
    pub name: &'static str,
    pub probability: f64,
    pub multiplier: f64,
    pub area: Range<u32>,
    pub bedrooms: Range<u32>,
    pub bathrooms: Range<u32>,
}

/// House types; Condominium < Apartment < Villa by price
pub static HOUSE_TYPES: [HouseTypeProfile; 3] = [
    HouseTypeProfile {
        name: "Villa",
        probability: 0.25,
        multiplier: 7.0,
        area: 150..600,
        bedrooms: 4..10,
        bathrooms: 3..7,
    },
    HouseTypeProfile {
        name: "Apartment",
        probability: 0.40,
        multiplier: 2.2,
        area: 80..220,
        bedrooms: 2..5,
        bathrooms: 1..4,
    },
    HouseTypeProfile {
        name: "Condominium",
        probability: 0.35,
        multiplier: 0.5,
        area: 35..110,
        bedrooms: 1..3,
        bathrooms: 1..2,
    },
];

/// Price before noise: `(base, structural price)`
pub fn structural_price(
    neighborhood: &Neighborhood,
    profile: &HouseTypeProfile,
    area: f64,
    bedrooms: u32,
    bathrooms: u32,
    age: u32,
) -> (f64, f64) {
    let base = area * neighborhood.price_per_m2 * profile.multiplier;
    let price = base + f64::from(bedrooms) * BEDROOM_VALUE + f64::from(bathrooms) * BATHROOM_VALUE
        - f64::from(age) * AGE_DEPRECIATION
        - neighborhood.distance_km * DISTANCE_PENALTY;
    (base, price)
}

/// Apply the price floor, then round to the nearest 1000 (ties to even)
pub fn finalize_price(raw: f64) -> f64 {
    (raw.max(PRICE_FLOOR_ETB) / 1000.0).round_ties_even() * 1000.0
}

/// Seeded record generator
pub struct HouseGenerator {
    rng: StdRng,
    type_dist: WeightedIndex<f64>,
}

impl HouseGenerator {
    pub fn new(seed: u64) -> Result<Self> {
        let type_dist = WeightedIndex::new(HOUSE_TYPES.iter().map(|t| t.probability))
            .map_err(|e| Error::InvalidInput(format!("Invalid house type weights: {}", e)))?;

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            type_dist,
        })
    }

    /// Draw one record
    pub fn next_record(&mut self) -> Result<HouseRecord> {
        let neighborhood = &NEIGHBORHOODS[self.rng.gen_range(0..NEIGHBORHOODS.len())];
        let profile = &HOUSE_TYPES[self.type_dist.sample(&mut self.rng)];

        let area = self.rng.gen_range(profile.area.clone());
        let bedrooms = self.rng.gen_range(profile.bedrooms.clone());
        let bathrooms = self.rng.gen_range(profile.bathrooms.clone());
        let age = self.rng.gen_range(AGE_YEARS);

        let (base, price) =
            structural_price(neighborhood, profile, f64::from(area), bedrooms, bathrooms, age);

        let noise = Normal::new(0.0, base * NOISE_RATIO)
            .map_err(|e| Error::InvalidInput(format!("Invalid noise scale {}: {}", base, e)))?;
        let price = finalize_price(price + noise.sample(&mut self.rng));

        Ok(HouseRecord {
            location: neighborhood.name.to_string(),
            house_type: profile.name.to_string(),
            area: f64::from(area),
            bedrooms,
            bathrooms,
            age,
            distance_to_center: neighborhood.distance_km,
            price,
        })
    }

    /// Draw `n` records
    pub fn generate(&mut self, n: usize) -> Result<Vec<HouseRecord>> {
        (0..n).map(|_| self.next_record()).collect()
    }
}

/// Generate `n` records from a fresh generator seeded with `seed`
pub fn generate(n: usize, seed: u64) -> Result<Vec<HouseRecord>> {
    HouseGenerator::new(seed)?.generate(n)
}

/// Record counts for logging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationSummary {
    pub total: usize,
    pub per_type: BTreeMap<String, usize>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

pub fn summarize(records: &[HouseRecord]) -> GenerationSummary {
    let mut summary = GenerationSummary {
        total: records.len(),
        ..GenerationSummary::default()
    };
    for record in records {
        *summary.per_type.entry(record.house_type.clone()).or_insert(0) += 1;
        summary.min_price = Some(summary.min_price.map_or(record.price, |p| p.min(record.price)));
        summary.max_price = Some(summary.max_price.map_or(record.price, |p| p.max(record.price)));
    }
    summary
}
