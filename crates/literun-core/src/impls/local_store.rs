//! LocalArtifactStore - std::fs による ArtifactStore

use crate::domain::StageError;
use crate::ports::ArtifactStore;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalArtifactStore;

impl LocalArtifactStore {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactStore for LocalArtifactStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), StageError> {
        fs::create_dir_all(dir).map_err(|e| StageError::io(dir, e))
    }

    fn remove(&self, path: &Path) -> Result<(), StageError> {
        fs::remove_file(path).map_err(|e| StageError::io(path, e))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StageError> {
        fs::write(path, bytes).map_err(|e| StageError::io(path, e))
    }
}
