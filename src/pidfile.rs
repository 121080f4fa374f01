//! PID record persistence.
//!
//! start() writes a small JSON record of the daemon it spawned; stop and
//! status treat a live recorded PID as the authoritative handle and fall
//! back to process-table discovery only when no usable record exists.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PidFileError {
    #[error("failed to read PID record {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write PID record {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt PID record {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Record of the daemon process spawned by the last successful start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PidRecord {
    pub pid: u32,
    pub binary: PathBuf,
    pub started_at: DateTime<Utc>,
}

impl PidRecord {
    pub fn new(pid: u32, binary: &Path) -> Self {
        Self {
            pid,
            binary: binary.to_path_buf(),
            started_at: Utc::now(),
        }
    }
}

/// Write `record` to `path`, replacing any previous record.
pub fn save(path: &Path, record: &PidRecord) -> Result<(), PidFileError> {
    let json = serde_json::to_string_pretty(record).map_err(|source| PidFileError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| PidFileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the record at `path`. A missing file is `Ok(None)`.
pub fn load(path: &Path) -> Result<Option<PidRecord>, PidFileError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PidFileError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let record = serde_json::from_str(&content).map_err(|source| PidFileError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(record))
}

/// Remove the record, ignoring a missing file.
pub fn remove(path: &Path) -> Result<(), PidFileError> {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            return Err(PidFileError::Write {
                path: path.to_path_buf(),
                source: e,
            });
        }
    }
    Ok(())
}
