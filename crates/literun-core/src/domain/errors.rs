//! Errors - エラー型と分類
//!
//! Staging either completes fully or fails before anything is written, so
//! every variant here is final for the current call. Nothing is retried.

use std::path::PathBuf;

use crate::ports::TransportError;

/// ErrorKind は失敗の分類
///
/// - Usage: the core is used outside its required environment
/// - Infrastructure: local filesystem or serialization failure
/// - Transport: the one-way channel refused the message locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Infrastructure,
    Transport,
}

/// Which part of a command carried a reserved separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandPart {
    Operation,
    Key,
    Value,
}

impl std::fmt::Display for CommandPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandPart::Operation => f.write_str("operation"),
            CommandPart::Key => f.write_str("parameter key"),
            CommandPart::Value => f.write_str("parameter value"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("path {path} does not start with {mount_root}; provide a path on the shared drive")]
    InvalidPath { path: PathBuf, mount_root: PathBuf },

    #[error("shared drive {mount_root} does not exist; not running inside the notebook runtime?")]
    EnvironmentNotReady { mount_root: PathBuf },

    #[error("{part} {text:?} contains reserved separator {separator:?}")]
    AmbiguousCommand {
        part: CommandPart,
        text: String,
        separator: String,
    },

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("notebook serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl StageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StageError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StageError::InvalidPath { .. }
            | StageError::EnvironmentNotReady { .. }
            | StageError::AmbiguousCommand { .. } => ErrorKind::Usage,
            StageError::Io { .. } | StageError::Serialize(_) => ErrorKind::Infrastructure,
            StageError::Transport(_) => ErrorKind::Transport,
        }
    }
}
