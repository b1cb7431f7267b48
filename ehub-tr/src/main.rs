//! ehub-tr (Trainer) - fits the housing price model
//!
//! Locates the generated dataset, fits ordinary least squares over the
//! encoded features and exports the artifacts the prediction service loads.
//! A missing dataset is reported and the trainer exits without error.

use anyhow::{Context, Result};
use clap::Parser;
use ehub_common::config::{
    load_toml_config, log_config_source, resolve_config_path, resolve_models_dir,
};
use ehub_common::dataset::read_records;
use ehub_common::Error;
use ehub_tr::{export, locate_dataset, train, ExportFormat};
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments for ehub-tr
#[derive(Parser, Debug)]
#[command(name = "ehub-tr")]
#[command(about = "Train the Addis Ababa housing price model")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing addis_housing.csv (default: search data/, ../data/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Directory to write artifacts into
    #[arg(short, long)]
    models_dir: Option<PathBuf>,

    /// Artifact format: full, lite or both
    #[arg(short, long, default_value_t = ExportFormat::Both)]
    format: ExportFormat,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let config = load_toml_config(&config_path).context("Failed to load config")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .init();
    log_config_source(&config_path);

    info!("Training Refined Addis Housing model...");

    let data_dir = args.data_dir.clone().or_else(|| config.data_dir.clone());
    let csv_path = match locate_dataset(data_dir.as_deref()) {
        Ok(path) => path,
        Err(e @ Error::DataNotFound(_)) => {
            error!("{}", e);
            error!("Run ehub-dg first to generate the dataset");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    info!("Reading dataset from {}", csv_path.display());

    let records = read_records(&csv_path)
        .with_context(|| format!("Failed to read {}", csv_path.display()))?;
    let trained = train(&records).context("Failed to fit model")?;

    info!(
        "Fitted {} samples (rank {}): R² = {:.4}, RMSE = {:.0} ETB",
        trained.report.samples,
        trained.report.rank,
        trained.report.r_squared,
        trained.report.rmse
    );
    info!("Intercept: {:.2}", trained.model.intercept);
    for (name, weight) in trained
        .model
        .feature_names
        .iter()
        .zip(&trained.model.coefficients)
    {
        info!("  {:<20} {:>16.2}", name, weight);
    }
    info!(
        "Vocabularies: {} locations, {} types",
        trained.locations.classes.len(),
        trained.types.classes.len()
    );

    let models_dir = resolve_models_dir(args.models_dir.as_deref(), &config);
    let written = export(&trained, &models_dir, args.format).context("Failed to export artifacts")?;
    info!("Refined Addis Housing model and encoders saved ({} files)", written.len());

    Ok(())
}
