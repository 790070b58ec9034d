//! Bootstrap / teardown cells
//!
//! The bootstrap cell runs first: it installs the grading package into the
//! runtime and moves into the submission directory. The teardown cell runs
//! last and moves back to the shared drive.

use serde_json::{Map, Value, json};
use std::path::Path;

use super::errors::StageError;
use super::notebook::{Cell, Notebook};
use super::shared_path::MountRoot;

/// Default wheel installed by the bootstrap cell.
pub const DEFAULT_GRADER_PACKAGE: &str = "/jupyter/pypi/otter_grader-6.1.3-py3-none-any.whl";

/// Metadata that keeps injected cells visible when the run is inspected.
pub fn visible_metadata() -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(
        "jupyter".to_string(),
        json!({ "source_hidden": false, "outputs_hidden": false }),
    );
    metadata
}

/// Quote `text` as a Python string literal.
fn py_str(text: &str) -> String {
    // A JSON string literal is also a valid Python one.
    Value::String(text.to_string()).to_string()
}

/// Text of `path` for a cell source. Non-UTF-8 paths cannot be written
/// into Python source as-is, so they are rejected.
fn path_text<'a>(path: &'a Path, mount_root: &MountRoot) -> Result<&'a str, StageError> {
    path.to_str().ok_or_else(|| StageError::InvalidPath {
        path: path.to_path_buf(),
        mount_root: mount_root.as_path().to_path_buf(),
    })
}

pub fn bootstrap_source(
    grader_package: &str,
    working_dir: &Path,
    mount_root: &MountRoot,
) -> Result<String, StageError> {
    let working_dir = path_text(working_dir, mount_root)?;
    Ok(format!(
        "import micropip\n\
         import os\n\
         \n\
         await micropip.install({})\n\
         \n\
         os.chdir({})\n",
        py_str(grader_package),
        py_str(working_dir),
    ))
}

pub fn teardown_source(mount_root: &MountRoot) -> Result<String, StageError> {
    let root = path_text(mount_root.as_path(), mount_root)?;
    Ok(format!("import os\nos.chdir({})\n", py_str(root)))
}

pub fn bootstrap_cell(
    grader_package: &str,
    working_dir: &Path,
    mount_root: &MountRoot,
) -> Result<Cell, StageError> {
    let source = bootstrap_source(grader_package, working_dir, mount_root)?;
    Ok(Cell::code(source, visible_metadata()))
}

pub fn teardown_cell(mount_root: &MountRoot) -> Result<Cell, StageError> {
    Ok(Cell::code(teardown_source(mount_root)?, visible_metadata()))
}

/// Copy of `notebook` with `bootstrap` first and `teardown` last.
pub fn inject(notebook: &Notebook, bootstrap: Cell, teardown: Cell) -> Notebook {
    let mut cells = Vec::with_capacity(notebook.cells.len() + 2);
    cells.push(bootstrap);
    cells.extend(notebook.cells.iter().cloned());
    cells.push(teardown);
    Notebook {
        cells,
        ..notebook.clone()
    }
}
