//! JSON file backed state store

use super::{StateError, StateStore};
use std::path::{Path, PathBuf};

/// Stores each key as `<dir>/<key>.json`
///
/// Writes land in a sibling temp file that is renamed over the target, so a
/// reader sees either the previous or the new record, never a partial one.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StateError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StateError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), StateError> {
        let write_err = |source| StateError::Write {
            key: key.to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;
        let target = self.path(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, contents).map_err(write_err)?;
        std::fs::rename(&tmp, &target).map_err(write_err)?;

        tracing::trace!(path = %target.display(), "State written");
        Ok(())
    }
}
