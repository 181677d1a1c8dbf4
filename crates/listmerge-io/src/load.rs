use crate::error::{IoError, Result};
use listmerge_core::{value_kind, Record, RecordBatch};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    Array,
    Object,
    /// Valid JSON that holds no records, e.g. a bare string or number.
    Ignored(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub records: usize,
    pub shape: DocumentShape,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub batch: RecordBatch,
    pub files: Vec<LoadedFile>,
}

pub fn parse_records(path: &Path, data: &[u8]) -> Result<(Vec<Record>, DocumentShape)> {
    let value: Value = serde_json::from_slice(data).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(items) => {
            let records = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    Record::from_value(item).map_err(|source| IoError::NotARecord {
                        path: path.to_path_buf(),
                        index,
                        source,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok((records, DocumentShape::Array))
        }
        Value::Object(fields) => Ok((vec![Record::new(fields)], DocumentShape::Object)),
        other => Ok((Vec::new(), DocumentShape::Ignored(value_kind(&other)))),
    }
}

pub fn load_file(path: &Path) -> Result<(Vec<Record>, DocumentShape)> {
    let data = fs::read(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(path, &data)
}

/// Loads every file in order; the first failure aborts the whole batch.
pub fn load_batch(paths: &[PathBuf]) -> Result<LoadReport> {
    let mut report = LoadReport::default();
    for path in paths {
        let (records, shape) = load_file(path)?;
        report.files.push(LoadedFile {
            path: path.clone(),
            records: records.len(),
            shape,
        });
        report.batch.records.extend(records);
        report.batch.files_processed += 1;
    }
    Ok(report)
}
