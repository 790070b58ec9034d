//! Notebook - nbformat v4 ドキュメント
//!
//! Only the fields staging touches are typed. Everything else (outputs,
//! attachments, kernelspec, ...) is carried through `extra` untouched.
//!
//! Serialization follows the nbformat writer: sorted keys, one-space indent,
//! multi-line sources as lists of lines, trailing newline. The same document
//! always produces the same bytes.

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Code,
    Markdown,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(
        default,
        deserialize_with = "multiline::deserialize",
        serialize_with = "multiline::serialize"
    )]
    pub source: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cell {
    /// A fresh, never-executed code cell.
    pub fn code(source: impl Into<String>, metadata: Map<String, Value>) -> Self {
        let mut extra = Map::new();
        extra.insert("execution_count".to_string(), Value::Null);
        extra.insert("outputs".to_string(), Value::Array(Vec::new()));
        Self {
            cell_type: CellKind::Code,
            id: None,
            metadata,
            source: source.into(),
            extra,
        }
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellKind::Markdown,
            id: None,
            metadata: Map::new(),
            source: source.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub nbformat: u32,
    pub nbformat_minor: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Notebook {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            metadata: Map::new(),
            nbformat: 4,
            nbformat_minor: 5,
            extra: Map::new(),
        }
    }
}

impl Notebook {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            ..Self::default()
        }
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Cell ids exist from nbformat 4.5 on.
    pub fn supports_cell_ids(&self) -> bool {
        self.nbformat > 4 || (self.nbformat == 4 && self.nbformat_minor >= 5)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Render to nbformat-style JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        // Going through Value sorts every object's keys.
        let value = serde_json::to_value(self)?;
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut ser)?;
        out.push(b'\n');
        Ok(out)
    }
}

mod multiline {
    use super::*;
    use serde::Deserializer;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Source {
        Text(String),
        Lines(Vec<String>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
        Ok(match Source::deserialize(de)? {
            Source::Text(text) => text,
            Source::Lines(lines) => lines.concat(),
        })
    }

    pub fn serialize<S: Serializer>(source: &str, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_seq(source.split_inclusive('\n'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "cells": [
                {
                    "cell_type": "markdown",
                    "id": "intro",
                    "metadata": {},
                    "source": ["# Title\n", "text"]
                },
                {
                    "cell_type": "code",
                    "execution_count": 3,
                    "id": "c1",
                    "metadata": {"tags": ["otter_ignore"]},
                    "outputs": [{"output_type": "stream", "name": "stdout", "text": ["hi\n"]}],
                    "source": "print('hi')\nx = 1"
                }
            ],
            "metadata": {"kernelspec": {"name": "python3"}},
            "nbformat": 4,
            "nbformat_minor": 5
        })
    }

    #[test]
    fn source_accepts_both_forms() {
        let nb: Notebook = serde_json::from_value(sample()).unwrap();
        assert_eq!(nb.cells[0].source, "# Title\ntext");
        assert_eq!(nb.cells[1].source, "print('hi')\nx = 1");
        assert_eq!(nb.cells[1].cell_type, CellKind::Code);
    }

    #[test]
    fn unknown_fields_survive() {
        let nb: Notebook = serde_json::from_value(sample()).unwrap();
        let back: Value = serde_json::from_slice(&nb.to_bytes().unwrap()).unwrap();
        assert_eq!(back["cells"][1]["execution_count"], json!(3));
        assert_eq!(back["cells"][1]["outputs"][0]["text"], json!(["hi\n"]));
        assert_eq!(back["metadata"]["kernelspec"]["name"], json!("python3"));
        assert_eq!(back["cells"][1]["source"], json!(["print('hi')\n", "x = 1"]));
    }

    #[test]
    fn output_is_deterministic() {
        let nb: Notebook = serde_json::from_value(sample()).unwrap();
        let first = nb.to_bytes().unwrap();
        let again = Notebook::from_reader(first.as_slice()).unwrap().to_bytes().unwrap();
        assert_eq!(first, again);
        assert!(first.ends_with(b"}\n"));
        assert!(String::from_utf8(first).unwrap().starts_with("{\n \"cells\": ["));
    }

    #[test]
    fn code_cell_has_nbformat_fields() {
        let cell = Cell::code("x = 1\n", Map::new());
        let value = serde_json::to_value(&cell).unwrap();
        assert_eq!(value["execution_count"], Value::Null);
        assert_eq!(value["outputs"], json!([]));
        assert!(value.get("id").is_none());
    }

    #[test]
    fn empty_source_is_empty_list() {
        let value = serde_json::to_value(Cell::markdown("")).unwrap();
        assert_eq!(value["source"], json!([]));
    }

    #[test]
    fn cell_id_support_by_version() {
        let mut nb = Notebook::default();
        assert!(nb.supports_cell_ids());
        nb.nbformat_minor = 4;
        assert!(!nb.supports_cell_ids());
    }
}
