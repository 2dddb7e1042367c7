use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use wiezen_core::game::persistence::{PersistError, PersistenceAdapter};
use wiezen_core::game::serialization::Snapshot;

/// Keeps the saved game as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            source,
            path: self.path.clone(),
        }
    }
}

impl PersistenceAdapter for JsonFileStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| self.io_error(source))?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        // Staged write; the target only ever holds a complete snapshot.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|source| self.io_error(source))?;
        fs::rename(&staging, &self.path).map_err(|source| self.io_error(source))?;
        tracing::debug!(path = %self.path.display(), rounds = snapshot.rounds.len(), "game saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };
        Ok(Some(Snapshot::from_json(&json)?))
    }
}
