//! Line-delimited JSON extraction.

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A raw record: source field names mapped to their values.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path:?} at line {line}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read every non-blank line of `path` as one `T`, keeping file order.
pub fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ExtractError> {
    let io_error = |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);

    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line).map_err(|source| ExtractError::Parse {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read `path` as untyped records.
pub fn read_records(path: &Path) -> Result<Vec<Record>, ExtractError> {
    read_json_lines(path)
}
