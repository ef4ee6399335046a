//! # Ingestion
//!
//! Command output reaches the pipeline either as a bare list of lines or as
//! an object holding that list under `_data` (the shape the controller API
//! returns for text-only show commands). [`Table`] is the single canonical
//! form every parser consumes.

use serde_json::Value;

use crate::error::IngestError;

/// Field under which the controller wraps text output.
pub const DATA_FIELD: &str = "_data";

/// An ordered collection of raw text lines from one device query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    lines: Vec<String>,
}

impl Table {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Normalizes a collected JSON value.
    ///
    /// `null`, a `null` `_data` payload and empty lists all give an empty
    /// table. Non-string list items are kept as their JSON text.
    pub fn from_value(value: Value) -> Result<Self, IngestError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Array(items) => Ok(Self::from_items(items)),
            Value::Object(mut map) => match map.remove(DATA_FIELD) {
                Some(Value::Array(items)) => Ok(Self::from_items(items)),
                Some(Value::Null) => Ok(Self::default()),
                Some(other) => Err(unexpected(&other)),
                None => Err(unexpected(&Value::Object(map))),
            },
            other => Err(unexpected(&other)),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, IngestError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Splits plain text output into lines, dropping blank ones.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn from_items(items: Vec<Value>) -> Self {
        let lines: Vec<String> = items
            .into_iter()
            .map(|item| match item {
                Value::String(line) => line,
                other => other.to_string(),
            })
            .collect();
        Self { lines }
    }
}

impl From<Vec<String>> for Table {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

fn unexpected(value: &Value) -> IngestError {
    let found: &str = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    };
    IngestError::UnexpectedShape {
        field: DATA_FIELD,
        found: found.to_string(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
