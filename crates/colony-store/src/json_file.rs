//! A [`SaveStore`] backed by a single JSON file.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use colony_core::persistence::{self, PersistenceError, SaveStore};
use colony_types::SaveEnvelope;

/// Extension appended to the save path for the in-progress write.
const TEMP_EXTENSION: &str = "tmp";

/// Stores one save envelope as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for `path`. Nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the save file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a save file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Delete the save file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the file exists but cannot be
    /// removed.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == IoErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".");
        temp.push(TEMP_EXTENSION);
        PathBuf::from(temp)
    }
}

impl SaveStore for JsonFileStore {
    fn save(&mut self, envelope: &SaveEnvelope) -> Result<(), PersistenceError> {
        let json = persistence::encode(envelope)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, json.as_bytes())?;
        fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), bytes = json.len(), "Save file written");
        Ok(())
    }

    fn load(&mut self) -> Result<Option<SaveEnvelope>, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let envelope = persistence::decode(&json)?;
        debug!(path = %self.path.display(), version = %envelope.version, "Save file read");
        Ok(Some(envelope))
    }
}
