//! Domain model (shared paths, commands, notebooks, ...).
//!
//! I/O free. Filesystem and transport access go through `ports`.

pub mod comm;
pub mod command;
pub mod errors;
pub mod injection;
pub mod notebook;
pub mod shared_path;

pub use self::comm::{CommData, CommMessage, DEFAULT_TARGET_NAME};
pub use self::command::{Command, RUN_NOTEBOOK, WireFormat};
pub use self::errors::{CommandPart, ErrorKind, StageError};
pub use self::notebook::{Cell, CellKind, Notebook};
pub use self::shared_path::{DEFAULT_MOUNT_ROOT, MountRoot, SharedPath};
