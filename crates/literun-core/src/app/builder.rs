//! StagerBuilder - NotebookStager の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - build() 時に設定を検証し、不正なら BuildError を返す
//! - transport は必須（暗黙のグローバルチャネルは持たない）

use std::path::{Component, Path};
use std::sync::Arc;

use crate::app::{CommandChannel, NotebookStager};
use crate::config::RunnerConfig;
use crate::impls::LocalArtifactStore;
use crate::ports::{ArtifactStore, Clock, CommTransport, IdGenerator, SystemClock, UlidGenerator};

/// BuildError は構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no comm transport configured")]
    MissingTransport,

    #[error("mount root {0} must be an absolute path")]
    RelativeMountRoot(String),

    #[error("{field} {value:?} must be a single non-empty path component")]
    InvalidArtifactName { field: &'static str, value: String },

    #[error("invalid wire format: {0}")]
    InvalidWireFormat(&'static str),
}

/// # 使用例
/// ```ignore
/// let stager = StagerBuilder::new(RunnerConfig::default())
///     .transport(transport)
///     .build()?;
/// let staged = stager.stage(&notebook, std::env::current_dir()?)?;
/// ```
pub struct StagerBuilder {
    config: RunnerConfig,
    transport: Option<Box<dyn CommTransport>>,
    store: Option<Box<dyn ArtifactStore>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl StagerBuilder {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            transport: None,
            store: None,
            clock: None,
            ids: None,
        }
    }

    pub fn transport<T: CommTransport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Defaults to [`LocalArtifactStore`].
    pub fn store<S: ArtifactStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Defaults to [`SystemClock`].
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Defaults to a [`UlidGenerator`] on the system clock.
    pub fn id_generator<I: IdGenerator + 'static>(mut self, ids: I) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    pub fn build(self) -> Result<NotebookStager, BuildError> {
        validate(&self.config)?;
        let transport = self.transport.ok_or(BuildError::MissingTransport)?;
        let store = self
            .store
            .unwrap_or_else(|| Box::new(LocalArtifactStore::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock)));

        let channel = CommandChannel::new(
            transport,
            self.config.wire.clone(),
            self.config.target_name.clone(),
            ids.clone(),
            clock,
        );
        Ok(NotebookStager::new(self.config, store, channel, ids))
    }
}

fn validate(config: &RunnerConfig) -> Result<(), BuildError> {
    let root = config.mount_root.as_path();
    if !root.is_absolute() {
        return Err(BuildError::RelativeMountRoot(root.display().to_string()));
    }

    single_component("temp_subdir", &config.temp_subdir)?;
    single_component("artifact_stem", &config.artifact_stem)?;
    if config.extension.starts_with('.') {
        return Err(BuildError::InvalidArtifactName {
            field: "extension",
            value: config.extension.clone(),
        });
    }
    single_component("extension", &config.extension)?;

    let wire = &config.wire;
    if wire.prefix.is_empty() {
        return Err(BuildError::InvalidWireFormat("prefix is empty"));
    }
    if wire.separator.is_empty() || wire.kv_separator.is_empty() {
        return Err(BuildError::InvalidWireFormat("separator is empty"));
    }
    if wire.separator.contains(wire.kv_separator.as_str()) {
        return Err(BuildError::InvalidWireFormat(
            "separator contains the key/value delimiter",
        ));
    }
    Ok(())
}

fn single_component(field: &'static str, value: &str) -> Result<(), BuildError> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(BuildError::InvalidArtifactName {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MountRoot;
    use crate::impls::RecordingTransport;
    use rstest::rstest;

    #[test]
    fn build_with_defaults() {
        let stager = StagerBuilder::new(RunnerConfig::default())
            .transport(RecordingTransport::new())
            .build();
        assert!(stager.is_ok());
    }

    #[test]
    fn transport_is_required() {
        let err = StagerBuilder::new(RunnerConfig::default()).build();
        assert!(matches!(err, Err(BuildError::MissingTransport)));
    }

    #[test]
    fn relative_mount_root_is_rejected() {
        let config = RunnerConfig {
            mount_root: MountRoot::new("drive"),
            ..RunnerConfig::default()
        };
        let err = StagerBuilder::new(config)
            .transport(RecordingTransport::new())
            .build();
        assert!(matches!(err, Err(BuildError::RelativeMountRoot(_))));
    }

    #[rstest]
    #[case::nested_subdir("a/b", "_temp_notebook", "ipynb")]
    #[case::parent_subdir("..", "_temp_notebook", "ipynb")]
    #[case::empty_stem("_temp", "", "ipynb")]
    #[case::dotted_extension("_temp", "_temp_notebook", ".ipynb")]
    #[case::empty_extension("_temp", "_temp_notebook", "")]
    fn artifact_names_must_be_plain(#[case] subdir: &str, #[case] stem: &str, #[case] ext: &str) {
        let config = RunnerConfig {
            temp_subdir: subdir.to_string(),
            artifact_stem: stem.to_string(),
            extension: ext.to_string(),
            ..RunnerConfig::default()
        };
        let err = StagerBuilder::new(config)
            .transport(RecordingTransport::new())
            .build();
        assert!(matches!(err, Err(BuildError::InvalidArtifactName { .. })));
    }

    #[test]
    fn separator_containing_delimiter_is_rejected() {
        let mut config = RunnerConfig::default();
        config.wire.separator = "=;".to_string();
        let err = StagerBuilder::new(config)
            .transport(RecordingTransport::new())
            .build();
        assert!(matches!(err, Err(BuildError::InvalidWireFormat(_))));
    }
}
