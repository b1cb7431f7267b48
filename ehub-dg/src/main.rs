//! ehub-dg (Data Generator) - synthetic training data
//!
//! Writes `data/addis_housing.csv` (by default) with 1500 records drawn from
//! seed 42. Any existing file at the output path is overwritten.

use anyhow::{Context, Result};
use clap::Parser;
use ehub_common::dataset::{write_records, DATASET_FILE};
use ehub_dg::{generate, summarize, DEFAULT_COUNT, DEFAULT_SEED};
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments for ehub-dg
#[derive(Parser, Debug)]
#[command(name = "ehub-dg")]
#[command(about = "Generate the synthetic Addis Ababa housing dataset")]
#[command(version)]
struct Args {
    /// Number of records to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
    count: usize,

    /// Random seed
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output CSV path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from("data").join(DATASET_FILE));

    info!("Generating {} records (seed {})", args.count, args.seed);
    let records = generate(args.count, args.seed).context("Failed to generate records")?;

    write_records(&output, &records)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let summary = summarize(&records);
    info!(
        "Generated {} records with refined hierarchy (Condo < Apartment < Villa) -> {}",
        summary.total,
        output.display()
    );
    for (house_type, count) in &summary.per_type {
        info!("  {}: {}", house_type, count);
    }
    if let (Some(min), Some(max)) = (summary.min_price, summary.max_price) {
        info!("  Price range: {:.0} - {:.0} ETB", min, max);
    }

    Ok(())
}
