use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::StateStore;
use crate::error::StoreError;

const SLOT_FILE_EXTENSION: &str = "json";

/// One file per slot inside a directory, created on first write.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        let file_name: String = slot
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.{}", file_name, SLOT_FILE_EXTENSION))
    }
}

impl StateStore for FileStateStore {
    fn read(&self, slot: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.slot_path(slot)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, slot: &str, content: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        // write-then-rename keeps the previous record intact if we die mid-write
        let path = self.slot_path(slot);
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
