//! Flat JSON file storage
//!
//! The whole ledger lives in a single pretty-printed JSON document. Saving
//! writes a sibling temporary file and renames it over the target, so the file
//! always holds one complete snapshot.

use crate::core::traits::SnapshotStore;
use crate::types::{LedgerError, Snapshot};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Snapshot store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "database.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileStore {
    /// Read and parse the snapshot file
    ///
    /// # Errors
    ///
    /// - `PersistenceUnavailable` if the file cannot be opened
    /// - `Serialization` if it is not a valid snapshot
    fn load(&mut self) -> Result<Snapshot, LedgerError> {
        let file = File::open(&self.path)
            .map_err(|e| LedgerError::persistence_unavailable(self.path.display(), e))?;

        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
        info!(path = %self.path.display(), "snapshot loaded");

        Ok(snapshot)
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), LedgerError> {
        let temp_path = self.temp_path();

        let mut writer = BufWriter::new(File::create(&temp_path)?);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
