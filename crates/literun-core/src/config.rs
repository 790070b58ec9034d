//! RunnerConfig - 設定
//!
//! Loaded from an optional JSON file, then overridden by `LITERUN_*`
//! environment variables. Every field has a default, so an empty file (or
//! none) gives the standard `/drive` layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::injection::DEFAULT_GRADER_PACKAGE;
use crate::domain::{DEFAULT_TARGET_NAME, MountRoot, WireFormat};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub mount_root: MountRoot,
    /// Subdirectory of the mount root holding the staging artifact.
    pub temp_subdir: String,
    pub artifact_stem: String,
    pub extension: String,
    /// Comm target the runtime extension listens on.
    pub target_name: String,
    /// Wheel installed by the bootstrap cell.
    pub grader_package: String,
    /// Stored for the runtime; nothing here enforces it.
    pub allow_errors: bool,
    pub wire: WireFormat,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mount_root: MountRoot::default(),
            temp_subdir: "_temp".to_string(),
            artifact_stem: "_temp_notebook".to_string(),
            extension: "ipynb".to_string(),
            target_name: DEFAULT_TARGET_NAME.to_string(),
            grader_package: DEFAULT_GRADER_PACKAGE.to_string(),
            allow_errors: false,
            wire: WireFormat::default(),
        }
    }
}

impl RunnerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `LITERUN_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`; unset variables leave fields alone.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("LITERUN_MOUNT_ROOT") {
            self.mount_root = MountRoot::new(v);
        }
        if let Some(v) = lookup("LITERUN_TEMP_SUBDIR") {
            self.temp_subdir = v;
        }
        if let Some(v) = lookup("LITERUN_TARGET_NAME") {
            self.target_name = v;
        }
        if let Some(v) = lookup("LITERUN_GRADER_PACKAGE") {
            self.grader_package = v;
        }
        if let Some(v) = lookup("LITERUN_ALLOW_ERRORS") {
            self.allow_errors = parse_bool("LITERUN_ALLOW_ERRORS", v)?;
        }
        Ok(self)
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.mount_root.join(&self.temp_subdir)
    }

    /// `<mount_root>/<temp_subdir>/<artifact_stem>.<extension>`
    pub fn artifact_path(&self) -> PathBuf {
        self.temp_dir()
            .join(format!("{}.{}", self.artifact_stem, self.extension))
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Env { var, value }),
    }
}
