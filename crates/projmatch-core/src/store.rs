use std::path::Path;

use thiserror::Error;

use crate::{ProjectRecord, TokenizedRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

const RECORD_HEADERS: [&str; 4] = ["title", "theme", "supervisors", "description"];
const TOKENIZED_HEADERS: [&str; 5] = ["title", "theme", "supervisors", "description", "tokens"];

/// Write records to a CSV file with the fixed column order.
///
/// Zero records still produces a header-only file so downstream stages see a
/// well-formed CSV.
pub fn write_records(path: &Path, records: &[ProjectRecord]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    if records.is_empty() {
        writer.write_record(RECORD_HEADERS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), count = records.len(), "wrote records CSV");
    Ok(())
}

/// Read records back from a CSV file. A header-only file yields an empty vec.
pub fn read_records(path: &Path) -> Result<Vec<ProjectRecord>, StoreError> {
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Write tokenized records (`title,theme,supervisors,description,tokens`).
pub fn write_tokenized(path: &Path, records: &[TokenizedRecord]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    if records.is_empty() {
        writer.write_record(TOKENIZED_HEADERS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), count = records.len(), "wrote tokenized CSV");
    Ok(())
}

pub fn read_tokenized(path: &Path) -> Result<Vec<TokenizedRecord>, StoreError> {
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
