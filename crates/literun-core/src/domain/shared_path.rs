//! SharedPath - 共有ドライブ上のパス
//!
//! The browser runtime only sees files under the shared mount root. Paths
//! handed to it must be expressed relative to that root.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::errors::StageError;

/// Default mount point shared with the notebook runtime.
pub const DEFAULT_MOUNT_ROOT: &str = "/drive";

/// MountRoot は共有ドライブのルート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MountRoot(PathBuf);

impl MountRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, child: impl AsRef<Path>) -> PathBuf {
        self.0.join(child)
    }

    /// Strip the mount root prefix from `path`.
    ///
    /// Plain string prefix: for a `/drive` mount, `/drive2/x` becomes `2/x`.
    pub fn to_shared_relative(&self, path: impl AsRef<Path>) -> Result<SharedPath, StageError> {
        let path = path.as_ref();
        let invalid = || StageError::InvalidPath {
            path: path.to_path_buf(),
            mount_root: self.0.clone(),
        };

        let (Some(text), Some(root)) = (path.to_str(), self.0.to_str()) else {
            return Err(invalid());
        };
        if root.is_empty() {
            return Err(invalid());
        }

        text.strip_prefix(root)
            .map(|rest| SharedPath(rest.to_string()))
            .ok_or_else(invalid)
    }
}

impl Default for MountRoot {
    fn default() -> Self {
        Self::new(DEFAULT_MOUNT_ROOT)
    }
}

impl fmt::Display for MountRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A path relative to the mount root, e.g. `/_temp/_temp_notebook.ipynb`.
///
/// Only [`MountRoot::to_shared_relative`] produces one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SharedPath(String);

impl SharedPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SharedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::nested("/drive/_temp/_temp_notebook.ipynb", "/_temp/_temp_notebook.ipynb")]
    #[case::direct_child("/drive/nb.ipynb", "/nb.ipynb")]
    #[case::root_itself("/drive", "")]
    #[case::trailing_slash("/drive/", "/")]
    #[case::sibling_prefix("/drive2/nb.ipynb", "2/nb.ipynb")]
    fn strips_mount_prefix(#[case] input: &str, #[case] expected: &str) {
        let root = MountRoot::default();
        let shared = root.to_shared_relative(input).unwrap();
        assert_eq!(shared.as_str(), expected);
    }

    #[rstest]
    #[case::other_dir("/tmp/x/submission/nb.ipynb")]
    #[case::relative("drive/nb.ipynb")]
    #[case::nested_mount("/home/drive/nb.ipynb")]
    #[case::empty("")]
    fn rejects_paths_outside_mount(#[case] input: &str) {
        let root = MountRoot::default();
        let err = root.to_shared_relative(input).unwrap_err();
        assert!(matches!(err, StageError::InvalidPath { .. }));
    }

    #[test]
    fn mount_root_with_trailing_slash() {
        let root = MountRoot::new("/drive/");
        let shared = root.to_shared_relative("/drive/a/b.ipynb").unwrap();
        assert_eq!(shared.as_str(), "a/b.ipynb");
        assert!(root.to_shared_relative("/drive").is_err());
    }

    #[test]
    fn every_suffix_is_returned_verbatim() {
        let root = MountRoot::new("/mnt/shared");
        for suffix in ["", "/a", "/a/b/c.ipynb", "/with space/x.ipynb", "2/x", "_old"] {
            let path = format!("/mnt/shared{suffix}");
            assert_eq!(root.to_shared_relative(&path).unwrap().as_str(), suffix);
        }
    }
}
