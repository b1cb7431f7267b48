//! Integration tests for the trainer
//!
//! Tests cover:
//! - Artifact recomputation reproduces the solver's fitted values (lite and full)
//! - Rank-deficient datasets (single type, fewer rows than features) still fit
//! - Vocabularies derived from a full generated dataset
//! - Export writes the requested files
//! - Dataset search over the candidate directories

use ehub_common::artifact::{FullArtifact, ModelArtifact, LITE_FILE, MODEL_FILE};
use ehub_common::dataset::{write_records, DATASET_FILE};
use ehub_common::housing::{DEFAULT_LOCATIONS, DEFAULT_TYPES, FEATURE_COUNT, FEATURE_NAMES};
use ehub_common::scoring::{LinearScorer, NativeScorer, Scorer};
use ehub_common::{Error, HouseRecord};
use ehub_dg::{generate, DEFAULT_COUNT, DEFAULT_SEED};
use ehub_tr::{export, locate_dataset, train, ExportFormat};
use serial_test::serial;
use tempfile::TempDir;

fn training_set() -> Vec<HouseRecord> {
    generate(DEFAULT_COUNT, DEFAULT_SEED).unwrap()
}

fn assert_close(a: f64, b: f64) {
    let tolerance = 1e-6 * a.abs().max(b.abs()).max(1.0);
    assert!((a - b).abs() <= tolerance, "{} vs {}", a, b);
}

#[test]
fn test_lite_artifact_reproduces_fitted_values() {
    let records = training_set();
    let trained = train(&records).unwrap();
    let fitted = &trained.fitted;

    let temp_dir = TempDir::new().unwrap();
    trained.lite_artifact().save(temp_dir.path()).unwrap();
    let scorer = LinearScorer::from_artifact(ModelArtifact::load(temp_dir.path()).unwrap());

    for (record, expected) in records.iter().zip(fitted) {
        let raw = scorer.score(&record.features()).unwrap();
        assert_close(raw, *expected);
    }
}

#[test]
fn test_full_artifact_reproduces_fitted_values() {
    let records = training_set();
    let trained = train(&records).unwrap();
    let fitted = &trained.fitted;

    let temp_dir = TempDir::new().unwrap();
    trained.full_artifact().save(temp_dir.path()).unwrap();
    let scorer = NativeScorer::from_artifact(FullArtifact::load(temp_dir.path()).unwrap());

    for (record, expected) in records.iter().zip(fitted) {
        let raw = scorer.score(&record.features()).unwrap();
        assert_close(raw, *expected);
    }
}

#[test]
fn test_vocabularies_and_feature_order() {
    let trained = train(&training_set()).unwrap();

    assert_eq!(trained.locations.classes, DEFAULT_LOCATIONS.to_vec());
    assert_eq!(trained.types.classes, DEFAULT_TYPES.to_vec());
    assert_eq!(trained.model.coefficients.len(), FEATURE_COUNT);
    assert_eq!(trained.model.feature_names, FEATURE_NAMES.to_vec());
}

#[test]
fn test_fit_tracks_generative_model() {
    let trained = train(&training_set()).unwrap();

    // area dominates the synthetic price
    let area = trained.model.coefficients[2];
    assert!(area > 0.0, "area coefficient {}", area);
    assert!(trained.report.r_squared > 0.0 && trained.report.r_squared <= 1.0);
    assert_eq!(trained.report.samples, DEFAULT_COUNT);
}

#[test]
fn test_single_type_dataset_trains() {
    let villas: Vec<HouseRecord> = training_set()
        .into_iter()
        .filter(|r| r.house_type == "Villa")
        .collect();
    assert!(villas.len() > FEATURE_COUNT);

    let trained = train(&villas).unwrap();
    assert_eq!(trained.types.classes, vec!["Villa"]);
    // constant Type column carries no weight
    assert_eq!(trained.model.coefficients[1], 0.0);
    assert_eq!(trained.report.rank, FEATURE_COUNT - 1);
    assert!(trained.report.r_squared > 0.0 && trained.report.r_squared <= 1.0);

    let scorer = LinearScorer::from_artifact(trained.lite_artifact());
    for (record, expected) in villas.iter().zip(&trained.fitted) {
        assert_close(scorer.score(&record.features()).unwrap(), *expected);
    }
}

#[test]
fn test_fewer_records_than_features_trains() {
    let records = generate(5, DEFAULT_SEED).unwrap();

    let trained = train(&records).unwrap();
    assert_eq!(trained.report.samples, 5);
    assert!(trained.report.rank <= 4);
    assert_eq!(trained.model.coefficients.len(), FEATURE_COUNT);
    assert!(trained.model.coefficients.iter().all(|w| w.is_finite()));
    assert!(trained.model.intercept.is_finite());

    let scorer = LinearScorer::from_artifact(trained.lite_artifact());
    for (record, expected) in records.iter().zip(&trained.fitted) {
        assert_close(scorer.score(&record.features()).unwrap(), *expected);
    }
}

#[test]
fn test_export_formats() {
    let trained = train(&training_set()).unwrap();

    let lite_dir = TempDir::new().unwrap();
    let written = export(&trained, lite_dir.path(), ExportFormat::Lite).unwrap();
    assert_eq!(written, vec![lite_dir.path().join(LITE_FILE)]);
    assert!(!lite_dir.path().join(MODEL_FILE).exists());

    let full_dir = TempDir::new().unwrap();
    let written = export(&trained, full_dir.path(), ExportFormat::Full).unwrap();
    assert_eq!(written.len(), 4);
    assert!(FullArtifact::exists(full_dir.path()));
    assert!(!full_dir.path().join(LITE_FILE).exists());

    let both_dir = TempDir::new().unwrap();
    let written = export(&trained, both_dir.path().join("models").as_path(), ExportFormat::Both)
        .unwrap();
    assert_eq!(written.len(), 5);
    assert!(written.iter().all(|p| p.is_file()));
}

#[test]
#[serial]
fn test_dataset_search_falls_back_to_parent_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let workdir = temp_dir.path().join("trainer");
    std::fs::create_dir_all(&workdir).unwrap();
    write_records(
        &temp_dir.path().join("data").join(DATASET_FILE),
        &generate(10, DEFAULT_SEED).unwrap(),
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(&workdir).unwrap();
    let found = locate_dataset(None);
    std::env::set_current_dir(original).unwrap();

    let found = found.unwrap();
    assert!(found.ends_with(format!("data/{}", DATASET_FILE)));
    assert!(found.starts_with(".."));
}

#[test]
#[serial]
fn test_dataset_missing_everywhere() {
    let temp_dir = TempDir::new().unwrap();
    let workdir = temp_dir.path().join("empty");
    std::fs::create_dir_all(&workdir).unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(&workdir).unwrap();
    let result = locate_dataset(None);
    std::env::set_current_dir(original).unwrap();

    match result {
        Err(Error::DataNotFound(paths)) => assert_eq!(paths.len(), 2),
        other => panic!("expected DataNotFound, got {:?}", other),
    }
}
