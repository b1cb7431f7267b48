//! CSV persistence for house records

use crate::housing::HouseRecord;
use crate::Result;
use std::fs;
use std::path::Path;

/// File name of the generated dataset
pub const DATASET_FILE: &str = "addis_housing.csv";

/// Write records with a header row, replacing any existing file
pub fn write_records(path: &Path, records: &[HouseRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read every record of a dataset written by [`write_records`]
pub fn read_records(path: &Path) -> Result<Vec<HouseRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
