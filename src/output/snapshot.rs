//! Snapshot writer
//!
//! Persists the full ordered set of committed records as one JSON document,
//! rewritten in full after every accepted record. The write goes to a
//! temporary file first and is renamed into place, so an interrupted run
//! always leaves the last fully-written snapshot intact.

use crate::record::CharacterRecord;
use crate::{FandexError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes character snapshots for one wiki
#[derive(Debug)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    /// Creates a writer targeting `<data_dir>/<slug>_characters.json`
    ///
    /// Creates the data directory if needed.
    pub fn new(data_dir: &Path, slug: &str) -> Result<Self> {
        fs::create_dir_all(data_dir).map_err(|source| FandexError::Persistence {
            path: data_dir.display().to_string(),
            source,
        })?;

        Ok(Self {
            path: data_dir.join(format!("{}_characters.json", slug)),
        })
    }

    /// The snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the snapshot with the given record set
    ///
    /// Failure here is crawl-fatal; silent data loss is unacceptable.
    pub fn write(&self, records: &[CharacterRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json.as_bytes()).map_err(|source| FandexError::Persistence {
            path: tmp_path.display().to_string(),
            source,
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|source| FandexError::Persistence {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }

    /// Reads the snapshot back, mainly for the invocation facade and tests
    pub fn read(&self) -> Result<Vec<CharacterRecord>> {
        let content = fs::read_to_string(&self.path).map_err(|source| FandexError::Persistence {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }
}
