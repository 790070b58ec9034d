//! Command - リモート実行ランタイムへの命令
//!
//! # Wire format
//! `PREFIX;;operation;;k1=v1;;k2=v2`
//!
//! Nothing is escaped. The listener in the browser runtime splits on the
//! separator and then on the first key/value delimiter, so commands whose
//! parts collide with those are rejected by [`WireFormat::validate`] instead
//! of being rewritten.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::errors::{CommandPart, StageError};

/// Operation understood by the runtime extension: run the notebook at `path`.
pub const RUN_NOTEBOOK: &str = "run_notebook";

/// Command は operation 名と順序付きパラメータ
///
/// Parameter order is significant; it is kept as inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    operation: String,
    params: Vec<(String, String)>,
}

impl Command {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            params: Vec::new(),
        }
    }

    pub fn run_notebook(path: impl Display) -> Self {
        Self::new(RUN_NOTEBOOK).param("path", path)
    }

    /// Append a parameter; the value is rendered with `Display`.
    pub fn param(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// WireFormat は命令のテキスト表現
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireFormat {
    pub prefix: String,
    pub separator: String,
    pub kv_separator: String,
}

impl Default for WireFormat {
    fn default() -> Self {
        Self {
            prefix: "$!__jupyter_lite_extension_procedure_call".to_string(),
            separator: ";;".to_string(),
            kv_separator: "=".to_string(),
        }
    }
}

impl WireFormat {
    pub fn encode(&self, command: &Command) -> String {
        let mut out = String::with_capacity(self.prefix.len() + command.operation.len() + 16);
        out.push_str(&self.prefix);
        out.push_str(&self.separator);
        out.push_str(&command.operation);
        for (key, value) in &command.params {
            out.push_str(&self.separator);
            out.push_str(key);
            out.push_str(&self.kv_separator);
            out.push_str(value);
        }
        out
    }

    /// Reject commands the listener could not split back unambiguously.
    pub fn validate(&self, command: &Command) -> Result<(), StageError> {
        self.check(CommandPart::Operation, &command.operation, &self.separator)?;
        for (key, value) in &command.params {
            self.check(CommandPart::Key, key, &self.separator)?;
            self.check(CommandPart::Key, key, &self.kv_separator)?;
            self.check(CommandPart::Value, value, &self.separator)?;
        }
        Ok(())
    }

    fn check(&self, part: CommandPart, text: &str, separator: &str) -> Result<(), StageError> {
        if text.contains(separator) {
            return Err(StageError::AmbiguousCommand {
                part,
                text: text.to_string(),
                separator: separator.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "$!__jupyter_lite_extension_procedure_call";

    #[test]
    fn encodes_run_notebook() {
        let wire = WireFormat::default();
        let encoded = wire.encode(&Command::run_notebook("/foo/bar.ipynb"));
        assert_eq!(encoded, format!("{PREFIX};;run_notebook;;path=/foo/bar.ipynb"));
    }

    #[test]
    fn no_params_has_no_trailing_separator() {
        let wire = WireFormat::default();
        assert_eq!(wire.encode(&Command::new("ping")), format!("{PREFIX};;ping"));
    }

    #[test]
    fn params_keep_insertion_order() {
        let wire = WireFormat::default();
        let cmd = Command::new("op").param("z", 1).param("a", true).param("m", "x");
        assert_eq!(wire.encode(&cmd), format!("{PREFIX};;op;;z=1;;a=true;;m=x"));
    }

    #[test]
    fn custom_separators() {
        let wire = WireFormat {
            prefix: "P".into(),
            separator: ";".into(),
            kv_separator: ":".into(),
        };
        let cmd = Command::new("op").param("k", "v");
        assert_eq!(wire.encode(&cmd), "P;op;k:v");
    }

    #[test]
    fn separator_in_value_is_rejected() {
        let wire = WireFormat::default();
        let err = wire.validate(&Command::run_notebook("/a;;b.ipynb")).unwrap_err();
        assert!(matches!(
            err,
            StageError::AmbiguousCommand { part: CommandPart::Value, .. }
        ));
    }

    #[test]
    fn delimiter_in_key_is_rejected() {
        let wire = WireFormat::default();
        let err = wire.validate(&Command::new("op").param("a=b", "c")).unwrap_err();
        assert!(matches!(
            err,
            StageError::AmbiguousCommand { part: CommandPart::Key, .. }
        ));
    }

    #[test]
    fn delimiter_in_value_is_allowed() {
        let wire = WireFormat::default();
        assert!(wire.validate(&Command::new("op").param("q", "a=b")).is_ok());
        assert!(wire.validate(&Command::run_notebook("/_temp/x.ipynb")).is_ok());
    }

    #[test]
    fn separator_in_operation_is_rejected() {
        let wire = WireFormat::default();
        assert!(wire.validate(&Command::new("run;;it")).is_err());
    }
}
