use crate::error::{IoError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Picks input files whose names carry a number inside an inclusive range.
#[derive(Debug, Clone)]
pub struct FileSelector {
    pattern: Regex,
    start: Option<u64>,
    end: Option<u64>,
}

impl FileSelector {
    pub fn new(pattern: &str, start: Option<u64>, end: Option<u64>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|err| IoError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;
        if regex.captures_len() < 2 {
            return Err(IoError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern needs a capture group for the file number".to_string(),
            });
        }

        Ok(Self {
            pattern: regex,
            start,
            end,
        })
    }

    pub fn file_number(&self, file_name: &str) -> Option<u64> {
        let captures = self.pattern.captures(file_name)?;
        captures.get(1)?.as_str().parse().ok()
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let Some(number) = self.file_number(file_name) else {
            return false;
        };
        self.start.map_or(true, |start| number >= start)
            && self.end.map_or(true, |end| number <= end)
    }

    /// Matching regular files in `dir`, sorted by file name.
    pub fn select(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let read_dir_err = |source| IoError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut selected: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if self.matches(&name) {
                selected.push((name, path));
            }
        }

        selected.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(selected.into_iter().map(|(_, path)| path).collect())
    }
}
