//! literun-core
//!
//! Stage a notebook on the shared drive of a browser-hosted notebook runtime
//! and ask that runtime, over a one-way comm channel, to run it.
//!
//! # モジュール構成
//! - **domain**: shared paths, commands + wire format, notebook model, cell injection, errors
//! - **ports**: CommTransport, ArtifactStore, Clock, IdGenerator
//! - **impls**: transports (mpsc / JSON lines / recording), local store, sequential ids
//! - **app**: StagerBuilder, NotebookStager, CommandChannel
//! - **config**: RunnerConfig
//!
//! Nothing comes back over the channel. A successful `stage` only means the
//! artifact was written and the command was handed to the transport.

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{BuildError, CommandChannel, NotebookStager, StagedNotebook, StagerBuilder};
pub use config::{ConfigError, RunnerConfig};
pub use domain::{Cell, CellKind, Command, MountRoot, Notebook, SharedPath, StageError, WireFormat};
