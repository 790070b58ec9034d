//! ArtifactStore port - 共有ドライブへのファイル配置
//!
//! # 実装
//! - **LocalArtifactStore**: std::fs

use std::path::Path;

use crate::domain::StageError;

/// ArtifactStore は staging artifact を置く場所
///
/// Only the operations the stager needs, in the order it needs them.
pub trait ArtifactStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Create `dir` and its parents. Already existing is fine.
    fn ensure_dir(&self, dir: &Path) -> Result<(), StageError>;

    fn remove(&self, path: &Path) -> Result<(), StageError>;

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StageError>;
}
