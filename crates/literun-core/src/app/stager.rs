//! NotebookStager - ノートブックを共有ドライブに置いて実行を依頼する
//!
//! # パイプライン（固定順序）
//! 1. mount root の存在確認
//! 2. bootstrap / teardown セルを注入（呼び出し元の Notebook は変更しない）
//! 3. temp ディレクトリを作成（既存なら何もしない）
//! 4. 既存の artifact を削除
//! 5. 書き込み
//! 6. shared path に変換して `run_notebook` を送信
//!
//! The command is built and validated before step 3, and the document is
//! serialized in memory before step 4, so a failing call leaves no file
//! behind that it wrote itself.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::CommandChannel;
use crate::config::RunnerConfig;
use crate::domain::injection::{bootstrap_cell, inject, teardown_cell};
use crate::domain::{Command, Notebook, SharedPath, StageError};
use crate::ports::{ArtifactStore, IdGenerator};

/// Result of a successful `stage` call.
#[derive(Debug, Clone)]
pub struct StagedNotebook {
    /// Where the artifact was written locally.
    pub local_path: PathBuf,
    /// The same file as the runtime sees it.
    pub shared_path: SharedPath,
    /// The injected document that was written.
    pub notebook: Notebook,
}

pub struct NotebookStager {
    config: RunnerConfig,
    store: Box<dyn ArtifactStore>,
    channel: CommandChannel,
    ids: Arc<dyn IdGenerator>,
}

impl NotebookStager {
    pub(crate) fn new(
        config: RunnerConfig,
        store: Box<dyn ArtifactStore>,
        channel: CommandChannel,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            config,
            store,
            channel,
            ids,
        }
    }

    pub fn channel(&self) -> &CommandChannel {
        &self.channel
    }

    /// Whether the runtime should keep going past failing cells.
    pub fn allow_errors(&self) -> bool {
        self.config.allow_errors
    }

    /// Copy of `notebook` with the bootstrap and teardown cells added.
    ///
    /// Fails with `InvalidPath` when `working_dir` or the mount root is not
    /// valid UTF-8, since either has to be spelled out in the cell source.
    pub fn inject(&self, notebook: &Notebook, working_dir: &Path) -> Result<Notebook, StageError> {
        let mount_root = &self.config.mount_root;
        let mut bootstrap = bootstrap_cell(&self.config.grader_package, working_dir, mount_root)?;
        let mut teardown = teardown_cell(mount_root)?;
        if notebook.supports_cell_ids() {
            bootstrap.id = Some(self.ids.generate_cell_id());
            teardown.id = Some(self.ids.generate_cell_id());
        }
        Ok(inject(notebook, bootstrap, teardown))
    }

    pub fn stage(
        &self,
        notebook: &Notebook,
        working_dir: impl AsRef<Path>,
    ) -> Result<StagedNotebook, StageError> {
        let working_dir = working_dir.as_ref();
        let mount_root = &self.config.mount_root;
        if !self.store.exists(mount_root.as_path()) {
            return Err(StageError::EnvironmentNotReady {
                mount_root: mount_root.as_path().to_path_buf(),
            });
        }

        let staged = self.inject(notebook, working_dir)?;

        let artifact = self.config.artifact_path();
        let shared_path = mount_root.to_shared_relative(&artifact)?;
        let command = Command::run_notebook(&shared_path);
        self.channel.wire().validate(&command)?;
        let bytes = staged.to_bytes()?;

        self.store.ensure_dir(&self.config.temp_dir())?;

        if self.store.exists(&artifact) {
            tracing::warn!(path = %artifact.display(), "replacing previous staged notebook");
            self.store.remove(&artifact)?;
        }

        tracing::info!(path = %artifact.display(), cells = staged.len(), "writing notebook");
        self.store.write(&artifact, &bytes)?;

        tracing::info!(
            path = %artifact.display(),
            cwd = %working_dir.display(),
            "running notebook"
        );
        self.channel.send(&command)?;

        Ok(StagedNotebook {
            local_path: artifact,
            shared_path,
            notebook: staged,
        })
    }

    /// Ask the runtime to run a notebook that is already on the shared drive.
    pub fn run_notebook(&self, local_path: impl AsRef<Path>) -> Result<SharedPath, StageError> {
        let shared_path = self.config.mount_root.to_shared_relative(local_path)?;
        self.channel.run_notebook(&shared_path)?;
        Ok(shared_path)
    }
}
