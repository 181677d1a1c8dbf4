use crate::error::{IoError, Result};
use listmerge_core::Record;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `records` as a pretty-printed JSON array, creating parent directories.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    write_record_sets(&[(path, records)])
}

/// Writes every target, or none of them.
///
/// Each set is staged to a temp file next to its destination. Destinations
/// are only replaced once all sets are staged.
pub fn write_record_sets(targets: &[(&Path, &[Record])]) -> Result<()> {
    let mut staged = Vec::with_capacity(targets.len());
    for (path, records) in targets {
        staged.push((*path, stage(path, records)?));
    }

    for (path, file) in staged {
        file.persist(path).map_err(|err| IoError::Write {
            path: path.to_path_buf(),
            source: err.error,
        })?;
    }
    Ok(())
}

fn stage(path: &Path, records: &[Record]) -> Result<NamedTempFile> {
    let write_err = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    let data = serde_json::to_vec_pretty(records).map_err(|source| IoError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
    file.write_all(&data).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    Ok(file)
}
